//! Entity state as reported by the external state provider
//!
//! The panel never mutates these; it only reads the most recent snapshot and
//! asks for changes through service calls.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity's live state (`{state, attributes, last_changed}`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntityState {
    pub entity_id: String,

    /// Raw state string, e.g. `"armed_away"`, `"locked"`, `"87"`.
    pub state: String,

    #[serde(default)]
    pub attributes: Map<String, Value>,

    pub last_changed: DateTime<Utc>,
}

impl EntityState {
    pub fn new(
        entity_id: impl Into<String>,
        state: impl Into<String>,
        last_changed: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
            last_changed,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Read a string attribute, treating empty strings as absent.
    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Keyed lookup from entity id to its latest state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    entities: HashMap<String, EntityState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.entities.get(entity_id)
    }

    /// Insert or replace an entity, keyed by its own id.
    pub fn upsert(&mut self, entity: EntityState) {
        self.entities.insert(entity.entity_id.clone(), entity);
    }

    pub fn remove(&mut self, entity_id: &str) -> Option<EntityState> {
        self.entities.remove(entity_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<EntityState> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = EntityState>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for entity in iter {
            snapshot.upsert(entity);
        }
        snapshot
    }
}
