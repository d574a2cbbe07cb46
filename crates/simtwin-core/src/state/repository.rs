//! Session state repository trait.

use super::model::SessionState;
use async_trait::async_trait;

/// An abstract store for the persisted session state.
///
/// This trait decouples the application's core logic from the specific
/// storage mechanism (a TOML file in the default implementation).
///
/// # Implementation Notes
///
/// Writes are synchronous best-effort: the in-memory view must always
/// update, and a failure to persist is logged and swallowed rather than
/// surfaced to the user. Reads always serve the in-memory view.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Returns the full current state.
    async fn state(&self) -> SessionState;

    /// Returns the currently selected model identifier.
    async fn selected_model(&self) -> String;

    /// Returns the active backend session id, if any.
    async fn session_id(&self) -> Option<String>;

    /// Replaces the selected model and persists it.
    ///
    /// Must not touch the session id.
    async fn set_selected_model(&self, model: String);

    /// Replaces the session id and persists it.
    ///
    /// `None` removes the persisted key rather than storing a null marker.
    async fn set_session_id(&self, session_id: Option<String>);
}
