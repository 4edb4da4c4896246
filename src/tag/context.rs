//! Render context shared between the host and tag handlers
//!
//!     The context is a stack of scopes mapping names to runtime values.
//!     Reads search innermost-first; writes land in the innermost scope,
//!     which is how a handler exports a value back to the template (the
//!     `as name` idiom). Pushing and popping scopes bounds the visibility
//!     of what a block-level handler sets.

use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    scopes: Vec<BTreeMap<String, Value>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            scopes: vec![BTreeMap::new()],
        }
    }

    /// Build a context with one root scope holding the given variables.
    pub fn with<I, K>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut context = Self::new();
        for (name, value) in vars {
            context.set(name, value);
        }
        context
    }

    /// Look a name up, innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind a name in the innermost scope.
    pub fn set<K: Into<String>>(&mut self, name: K, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    /// Drop the innermost scope. The root scope is never dropped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
