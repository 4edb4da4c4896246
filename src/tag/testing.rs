//! Test support for grammar and rendering tests
//!
//!     Fixture builders and assertion helpers shared by the unit and
//!     integration tests. Tests build private registries and contexts
//!     through these helpers instead of touching process-wide state, so
//!     every test owns its collaborators.

use std::fmt;

use serde_json::Value;

use crate::tag::context::RenderContext;
use crate::tag::error::CompileError;
use crate::tag::registry::{Entity, EntityRegistry};
use crate::tag::token::TokenQueue;

/// Build a context with one scope holding the given variables.
pub fn context_with(vars: &[(&str, Value)]) -> RenderContext {
    RenderContext::with(vars.iter().map(|(name, value)| (*name, value.clone())))
}

/// Build a registry holding the given entities.
pub fn registry_with(entities: Vec<Entity>) -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    for entity in entities {
        registry.register(entity);
    }
    registry
}

/// Build a token queue from string fragments.
pub fn queue_of(fragments: &[&str]) -> TokenQueue {
    TokenQueue::new(fragments.iter().map(|fragment| fragment.to_string()).collect())
}

/// Assert that a compile failed and its message contains the fragment.
pub fn assert_compile_fails<T: fmt::Debug>(result: Result<T, CompileError>, fragment: &str) {
    match result {
        Err(error) => {
            let message = error.to_string();
            assert!(
                message.contains(fragment),
                "Expected error message to contain '{}', but got '{}'",
                fragment,
                message
            );
        }
        Ok(value) => panic!("Expected compile failure, got {:?}", value),
    }
}
