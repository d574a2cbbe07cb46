//! Best-effort extraction of display fields from an opaque snapshot.
//!
//! The backend does not promise where (or whether) it reports a step counter
//! or elapsed time, so display code scans a fixed, ordered alias table. This
//! is strictly a projection: the snapshot is never mutated, no additional
//! semantics are inferred, and a miss yields an absent field rather than a
//! zero or an error.

use crate::snapshot::StateSnapshot;
use serde_json::Value;

/// Aliases checked for the step counter, in priority order.
pub const STEP_ALIASES: [&str; 2] = ["step", "step_count"];

/// Aliases checked for elapsed simulation time, in priority order.
pub const TIME_ALIASES: [&str; 3] = ["time", "t", "simulation_time"];

/// Step counter and elapsed time projected out of a snapshot, when present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateFields {
    pub step: Option<f64>,
    pub time: Option<f64>,
}

impl StateFields {
    /// Scans the snapshot for the step-counter and time aliases.
    ///
    /// For each category the first alias holding a numeric value wins;
    /// non-numeric values are skipped. A `None` snapshot yields both
    /// fields absent.
    pub fn extract(snapshot: Option<&StateSnapshot>) -> Self {
        let Some(snapshot) = snapshot else {
            return Self::default();
        };

        Self {
            step: first_numeric(snapshot, &STEP_ALIASES),
            time: first_numeric(snapshot, &TIME_ALIASES),
        }
    }
}

fn first_numeric(snapshot: &StateSnapshot, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|key| snapshot.get(key).and_then(Value::as_f64))
}
