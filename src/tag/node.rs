//! Executable node produced by a successful compile
//!
//!     The node owns the grouped captures of one invocation and shares the
//!     registered handler with the parser that compiled it. Rendering
//!     resolves each named capture against the current context, wraps the
//!     results as handler arguments, and returns the handler's text.
//!     Nodes are immutable after construction and safe to render from
//!     concurrent passes, each with its own context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::tag::context::RenderContext;
use crate::tag::error::RenderError;
use crate::tag::grammar::{ArgValue, Capture};
use crate::tag::registry::Entity;

/// Handler signature registered alongside a grammar.
pub type Handler =
    dyn Fn(&mut RenderContext, &TagArguments) -> Result<String, RenderError> + Send + Sync;

/// One compiled tag invocation, ready to render.
pub struct TagNode {
    arguments: BTreeMap<String, Capture>,
    handler: Arc<Handler>,
}

impl TagNode {
    pub(crate) fn new(arguments: BTreeMap<String, Capture>, handler: Arc<Handler>) -> Self {
        Self { arguments, handler }
    }

    /// The grouped captures, keyed by capture name.
    pub fn arguments(&self) -> &BTreeMap<String, Capture> {
        &self.arguments
    }

    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.keys().map(String::as_str)
    }

    /// Resolve every named capture and invoke the handler.
    pub fn render(&self, context: &mut RenderContext) -> Result<String, RenderError> {
        let mut resolved = BTreeMap::new();
        for (name, capture) in &self.arguments {
            resolved.insert(name.clone(), capture.resolve(context)?);
        }
        let arguments = TagArguments::new(resolved);
        (self.handler)(context, &arguments)
    }
}

impl fmt::Debug for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagNode")
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Resolved captures as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct TagArguments {
    values: BTreeMap<String, ArgValue>,
}

impl TagArguments {
    pub(crate) fn new(values: BTreeMap<String, ArgValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Runtime value captured by a variable element.
    pub fn value(&self, name: &str) -> Result<&Value, RenderError> {
        match self.get(name) {
            Some(ArgValue::Resolved(value)) => Ok(value),
            Some(_) => Err(self.wrong_kind(name, "resolved value")),
            None => Err(self.missing(name)),
        }
    }

    /// Raw token text captured by a name element.
    pub fn text(&self, name: &str) -> Result<&str, RenderError> {
        match self.get(name) {
            Some(ArgValue::Text(text)) => Ok(text),
            Some(_) => Err(self.wrong_kind(name, "raw token")),
            None => Err(self.missing(name)),
        }
    }

    /// Entity captured by an entity reference.
    pub fn entity(&self, name: &str) -> Result<&Entity, RenderError> {
        match self.get(name) {
            Some(ArgValue::Entity(entity)) => Ok(entity),
            Some(_) => Err(self.wrong_kind(name, "entity")),
            None => Err(self.missing(name)),
        }
    }

    /// Values collected by a sequence element, still unresolved.
    pub fn items(&self, name: &str) -> Result<&[ArgValue], RenderError> {
        match self.get(name) {
            Some(ArgValue::List(items)) => Ok(items),
            Some(_) => Err(self.wrong_kind(name, "list")),
            None => Err(self.missing(name)),
        }
    }

    /// Keyword and branch values captured by a choice element.
    pub fn branch(&self, name: &str) -> Result<(&str, &[ArgValue]), RenderError> {
        match self.get(name) {
            Some(ArgValue::Pair { keyword, values }) => Ok((keyword, values)),
            Some(_) => Err(self.wrong_kind(name, "choice branch")),
            None => Err(self.missing(name)),
        }
    }

    fn missing(&self, name: &str) -> RenderError {
        RenderError::MissingArgument {
            name: name.to_string(),
        }
    }

    fn wrong_kind(&self, name: &str, expected: &'static str) -> RenderError {
        RenderError::WrongKind {
            name: name.to_string(),
            expected,
        }
    }
}
