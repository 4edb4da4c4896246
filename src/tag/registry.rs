//! Entity registry consulted while compiling entity references
//!
//!     An entity is a host-side domain object registered under a
//!     `(namespace, name)` pair, e.g. `shop.Product`. Entity references in
//!     a grammar resolve against a registry handle passed explicitly into
//!     the compile call chain, so tests can run against a private registry
//!     instead of process-wide state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A registered domain object: its key pair plus an arbitrary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl Entity {
    pub fn new<S: Into<String>, T: Into<String>>(namespace: S, name: T) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            data: Value::Null,
        }
    }

    /// Preferred builder for attaching a payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// Keyed store of registered entities.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its own namespace/name pair. A later
    /// registration under the same pair replaces the earlier one.
    pub fn register(&mut self, entity: Entity) {
        let key = Self::key(&entity.namespace, &entity.name);
        self.entities.insert(key, entity);
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&Entity> {
        self.entities.get(&Self::key(namespace, name))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn key(namespace: &str, name: &str) -> String {
        format!("{}.{}", namespace, name)
    }
}
