//! Session state domain model.

use crate::catalog::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// Front-end state that persists across process runs.
///
/// `session_id` is either `None` or a value previously returned by a
/// successful initialize call; the front end never fabricates one. The two
/// fields are deliberately independent: changing the selected model does
/// not clear the session, so an in-progress session survives a UI-only
/// selection change. Session lifecycle is driven solely by explicit
/// initialize/reset operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    /// Identifier of the model currently displayed.
    #[serde(default = "default_model")]
    pub selected_model: String,

    /// Backend-assigned session identifier, absent when no session is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// RFC 3339 timestamp of the last persisted change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_model: default_model(),
            session_id: None,
            updated_at: None,
        }
    }
}
