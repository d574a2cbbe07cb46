//! Client configuration service.
//!
//! Resolution order for the backend base URL: `SIMTWIN_BASE_URL`
//! environment variable, then `config.toml` under the config directory,
//! then the built-in default.

use crate::paths::SimtwinPaths;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::sync::{Arc, RwLock};

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "SIMTWIN_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the simulation backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded on first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the client configuration, loading it if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = Self::load_config();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config() -> ClientConfig {
        if let Ok(url) = env::var(BASE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                return ClientConfig {
                    base_url: url.to_string(),
                };
            }
        }

        Self::load_from_file().unwrap_or_default()
    }

    fn load_from_file() -> Option<ClientConfig> {
        let path = SimtwinPaths::config_file().ok()?;
        let text = fs::read_to_string(&path).ok()?;
        match toml::from_str(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring malformed config file: {err}");
                None
            }
        }
    }
}
