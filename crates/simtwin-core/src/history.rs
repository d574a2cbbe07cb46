//! History records prepared for charting/tabulation.
//!
//! The backend returns an ordered sequence of state snapshots. Rendering
//! needs an x-axis: the first time-like alias found in the first record is
//! used; when no record carries one, each record is augmented with a
//! zero-based ordinal at render time. The augmentation is derived, never
//! persisted.

use crate::snapshot::StateSnapshot;
use serde_json::Value;

/// Keys recognized as a time-like axis, in priority order.
pub const AXIS_ALIASES: [&str; 5] = ["time", "t", "step", "step_count", "simulation_time"];

/// Key under which the synthesized ordinal is stored when no axis exists.
pub const ORDINAL_KEY: &str = "step";

/// A history sequence with a chosen axis key and the value columns to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySeries {
    /// Field used as the x-axis (a time-like alias, or the synthesized ordinal).
    pub axis_key: String,
    /// Remaining fields of the first record, in snapshot order.
    pub value_keys: Vec<String>,
    pub rows: Vec<StateSnapshot>,
}

impl HistorySeries {
    /// Builds a series from raw history records.
    ///
    /// The axis is the first [`AXIS_ALIASES`] entry matching a key of the
    /// first record, case-insensitively. Records lacking any time-like
    /// field each gain a sequential ordinal under [`ORDINAL_KEY`].
    pub fn build(mut rows: Vec<StateSnapshot>) -> Self {
        let axis_key = rows.first().and_then(find_axis_key);

        let axis_key = match axis_key {
            Some(key) => key,
            None => {
                for (index, row) in rows.iter_mut().enumerate() {
                    row.insert(ORDINAL_KEY, Value::from(index as u64));
                }
                ORDINAL_KEY.to_string()
            }
        };

        let value_keys = rows
            .first()
            .map(|row| {
                row.keys()
                    .filter(|key| !is_axis_alias(key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            axis_key,
            value_keys,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn find_axis_key(row: &StateSnapshot) -> Option<String> {
    AXIS_ALIASES.iter().find_map(|alias| {
        row.keys()
            .find(|key| key.to_lowercase() == *alias)
            .cloned()
    })
}

fn is_axis_alias(key: &str) -> bool {
    let lower = key.to_lowercase();
    AXIS_ALIASES.contains(&lower.as_str())
}
