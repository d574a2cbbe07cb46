//! Opaque simulation state returned by the backend.
//!
//! The backend owns the shape of its state; this layer never validates it
//! beyond best-effort field extraction for display (see [`crate::fields`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point-in-time snapshot of simulation state: an opaque mapping from
/// field name to scalar or nested structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot(Map<String, Value>);

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the snapshot is non-empty and every value is a scalar
    /// (string, number, boolean) or null. Flat snapshots render as a
    /// key/value table; anything else falls back to pretty JSON.
    pub fn is_flat(&self) -> bool {
        if self.0.is_empty() {
            return false;
        }
        self.0
            .values()
            .all(|v| matches!(v, Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)))
    }
}

impl From<Map<String, Value>> for StateSnapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
