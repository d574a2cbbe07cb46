//! TOML-file implementation of the session state repository.
//!
//! The file mirrors the in-memory [`SessionState`] and is rewritten
//! wholesale on every change. Writes are best-effort: a persistence
//! failure is logged and swallowed, and the in-memory view stays
//! authoritative for the rest of the process lifetime.

use crate::paths::SimtwinPaths;
use async_trait::async_trait;
use chrono::Utc;
use simtwin_core::state::{SessionState, StateRepository};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session state persisted to `state.toml` under the config directory.
#[derive(Clone)]
pub struct TomlStateRepository {
    /// Cached state; always the source of truth for reads.
    state: Arc<Mutex<SessionState>>,
    path: PathBuf,
}

impl TomlStateRepository {
    /// Opens the repository at the default platform location.
    ///
    /// When the config directory cannot be resolved the repository still
    /// works in-memory; persistence attempts will log and be skipped.
    pub fn open_default() -> Self {
        let path = SimtwinPaths::state_file().unwrap_or_else(|err| {
            tracing::warn!("cannot resolve state file path, state will not persist: {err}");
            PathBuf::from("state.toml")
        });
        Self::open(path)
    }

    /// Opens the repository at an explicit path, rehydrating persisted
    /// state if the file exists.
    pub fn open(path: PathBuf) -> Self {
        let state = Self::load(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), "failed to load session state, using defaults: {err}");
            SessionState::default()
        });
        Self {
            state: Arc::new(Mutex::new(state)),
            path,
        }
    }

    fn load(path: &Path) -> simtwin_core::Result<SessionState> {
        if !path.exists() {
            return Ok(SessionState::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Writes the state to disk. Best-effort only.
    fn persist(&self, state: &SessionState) {
        let text = match toml::to_string_pretty(state) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("failed to serialize session state: {err}");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %self.path.display(), "failed to create state dir: {err}");
                return;
            }
        }

        if let Err(err) = fs::write(&self.path, text) {
            tracing::warn!(path = %self.path.display(), "failed to persist session state: {err}");
        }
    }
}

#[async_trait]
impl StateRepository for TomlStateRepository {
    async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    async fn selected_model(&self) -> String {
        self.state.lock().await.selected_model.clone()
    }

    async fn session_id(&self) -> Option<String> {
        self.state.lock().await.session_id.clone()
    }

    async fn set_selected_model(&self, model: String) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.selected_model = model;
            state.updated_at = Some(Utc::now().to_rfc3339());
            state.clone()
        };
        self.persist(&snapshot);
    }

    async fn set_session_id(&self, session_id: Option<String>) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.session_id = session_id;
            state.updated_at = Some(Utc::now().to_rfc3339());
            state.clone()
        };
        self.persist(&snapshot);
    }
}
