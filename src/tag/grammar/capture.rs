//! Captured values and their render-time resolution

use serde_json::{json, Value};

use crate::tag::context::RenderContext;
use crate::tag::error::RenderError;
use crate::tag::expr::Expression;
use crate::tag::registry::Entity;

/// A value captured while matching one invocation against its grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Raw token text, from a name element
    Text(String),
    /// Deferred expression, from a variable element
    Expr(Expression),
    /// Entity looked up at compile time, from an entity reference
    Entity(Entity),
    /// Values accumulated by a sequence element, element names discarded
    List(Vec<ArgValue>),
    /// Matched keyword and branch values, from a choice element
    Pair { keyword: String, values: Vec<ArgValue> },
    /// Runtime value produced by resolving a deferred expression
    Resolved(Value),
}

impl ArgValue {
    /// Fully resolve into a runtime value.
    ///
    /// Handlers use this for list items, whose deferred expressions are
    /// passed through raw by [`Capture::resolve`]. Lists and branch values
    /// resolve elementwise; entities resolve to their registered record.
    pub fn resolve(&self, context: &RenderContext) -> Result<Value, RenderError> {
        match self {
            ArgValue::Text(text) => Ok(Value::String(text.clone())),
            ArgValue::Expr(expression) => expression.resolve(context),
            ArgValue::Entity(entity) => Ok(json!({
                "namespace": entity.namespace,
                "name": entity.name,
                "data": entity.data,
            })),
            ArgValue::List(items) => items
                .iter()
                .map(|item| item.resolve(context))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            ArgValue::Pair { keyword, values } => {
                let resolved = values
                    .iter()
                    .map(|value| value.resolve(context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(json!([keyword, resolved]))
            }
            ArgValue::Resolved(value) => Ok(value.clone()),
        }
    }
}

/// One (name, value) record produced by a successful match.
///
/// The name is absent for anonymous captures, which the compiler discards
/// when it groups captures into the executable node's argument mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub name: Option<String>,
    pub value: ArgValue,
}

impl Capture {
    pub fn new(name: Option<String>, value: ArgValue) -> Self {
        Self { name, value }
    }

    /// Render-time resolution of this capture.
    ///
    /// A capture holding a deferred expression resolves it against the
    /// context; every other kind passes through unchanged. Lists keep
    /// their inner expression handles raw for the handler to resolve.
    pub fn resolve(&self, context: &RenderContext) -> Result<ArgValue, RenderError> {
        match &self.value {
            ArgValue::Expr(expression) => Ok(ArgValue::Resolved(expression.resolve(context)?)),
            other => Ok(other.clone()),
        }
    }
}
