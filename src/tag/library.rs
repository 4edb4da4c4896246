//! Registration glue between the host and declared tags
//!
//!     A library maps tag names to their registered parsers. The host
//!     hands a full invocation to [`TagLibrary::compile`], which splits
//!     it, dispatches on the first fragment, and delegates the remaining
//!     queue to the matching parser.

use std::collections::HashMap;

use crate::tag::compiler::TagParser;
use crate::tag::context::RenderContext;
use crate::tag::error::{CompileError, RenderError};
use crate::tag::grammar::Element;
use crate::tag::node::{TagArguments, TagNode};
use crate::tag::registry::EntityRegistry;
use crate::tag::token::{split_invocation, TokenQueue};

#[derive(Debug, Default)]
pub struct TagLibrary {
    tags: HashMap<String, TagParser>,
}

impl TagLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag under a name. A later registration under the same
    /// name replaces the earlier one.
    pub fn register<N, H>(&mut self, name: N, grammar: Vec<Element>, handler: H)
    where
        N: Into<String>,
        H: Fn(&mut RenderContext, &TagArguments) -> Result<String, RenderError>
            + Send
            + Sync
            + 'static,
    {
        self.tags.insert(name.into(), TagParser::new(grammar, handler));
    }

    pub fn get(&self, name: &str) -> Option<&TagParser> {
        self.tags.get(name)
    }

    /// Compile one invocation by dispatching on its tag name.
    pub fn compile(
        &self,
        invocation: &str,
        registry: &EntityRegistry,
    ) -> Result<TagNode, CompileError> {
        let fragments = split_invocation(invocation)?;
        let mut queue = TokenQueue::new(fragments);
        let tag_name = queue.pop().ok_or(CompileError::EmptyInvocation)?;
        let parser = self
            .tags
            .get(&tag_name)
            .ok_or_else(|| CompileError::UnknownTag {
                name: tag_name.clone(),
            })?;
        parser.compile_arguments(&tag_name, queue, registry)
    }
}
