//! Tag compiler - grammar walker and orchestrator
//!
//!     A `TagParser` is fixed at registration time: one declared grammar
//!     plus one handler function. Each invocation is compiled by splitting
//!     its text into fragments, dropping the tag name, and running the
//!     top-level grammar elements in order against the shared queue.
//!     Top-level elements are mandatory unless individually wrapped in an
//!     optional, so there is no rollback at this level.
//!
//!     After the last element runs the queue must be empty; anything left
//!     over fails with a usage message synthesized from the grammar:
//!
//!         related has the following syntax: {% related for <item> [as <alias>] %}
//!
//!     Captures are then grouped by name into the executable node's
//!     argument mapping. A later capture under a name replaces an earlier
//!     one, and anonymous captures are discarded.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::tag::context::RenderContext;
use crate::tag::error::{CompileError, RenderError};
use crate::tag::grammar::{join_syntax, Element};
use crate::tag::node::{Handler, TagArguments, TagNode};
use crate::tag::registry::EntityRegistry;
use crate::tag::token::{split_invocation, TokenQueue};

/// Compiles invocations of one declared tag into executable nodes.
pub struct TagParser {
    grammar: Arc<Vec<Element>>,
    handler: Arc<Handler>,
}

impl TagParser {
    pub fn new<H>(grammar: Vec<Element>, handler: H) -> Self
    where
        H: Fn(&mut RenderContext, &TagArguments) -> Result<String, RenderError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            grammar: Arc::new(grammar),
            handler: Arc::new(handler),
        }
    }

    /// The declared grammar, shared read-only across invocations.
    pub fn grammar(&self) -> &[Element] {
        &self.grammar
    }

    /// Usage fragment for the whole declaration.
    pub fn syntax(&self) -> String {
        join_syntax(&self.grammar)
    }

    /// Compile one invocation (tag name included) into an executable node.
    pub fn compile(
        &self,
        invocation: &str,
        registry: &EntityRegistry,
    ) -> Result<TagNode, CompileError> {
        let fragments = split_invocation(invocation)?;
        let mut queue = TokenQueue::new(fragments);
        let tag_name = queue.pop().ok_or(CompileError::EmptyInvocation)?;
        self.compile_arguments(&tag_name, queue, registry)
    }

    /// Compile the argument queue of an invocation whose tag name was
    /// already consumed (the path taken through a tag library).
    pub(crate) fn compile_arguments(
        &self,
        tag_name: &str,
        mut queue: TokenQueue,
        registry: &EntityRegistry,
    ) -> Result<TagNode, CompileError> {
        let mut captures = Vec::new();
        for element in self.grammar.iter() {
            captures.extend(element.parse(registry, &mut queue)?);
        }
        if !queue.is_empty() {
            return Err(CompileError::Usage {
                tag: tag_name.to_string(),
                syntax: self.syntax(),
            });
        }
        let mut arguments = BTreeMap::new();
        for capture in captures {
            if let Some(name) = capture.name.clone() {
                // Overwrite-last: a duplicate name silently replaces the
                // earlier capture.
                arguments.insert(name, capture);
            }
        }
        Ok(TagNode::new(arguments, Arc::clone(&self.handler)))
    }
}

// The handler closure has no useful Debug form; print the grammar only.
impl fmt::Debug for TagParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagParser")
            .field("grammar", &self.grammar)
            .finish_non_exhaustive()
    }
}
