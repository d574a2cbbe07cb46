//! Unified path management for SimTwin configuration files.
//!
//! All client-side persisted state lives under the platform config
//! directory:
//!
//! ```text
//! ~/.config/simtwin/           # Linux (platform-appropriate elsewhere)
//! ├── config.toml              # Client configuration (backend base URL)
//! └── state.toml               # Persisted session state
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for SimTwin.
pub struct SimtwinPaths;

impl SimtwinPaths {
    /// Returns the SimTwin configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("simtwin"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session state file.
    pub fn state_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("state.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = SimtwinPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("simtwin"));
    }

    #[test]
    fn test_config_file() {
        let config_file = SimtwinPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = SimtwinPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_state_file() {
        let state_file = SimtwinPaths::state_file().unwrap();
        assert!(state_file.ends_with("state.toml"));
        let config_dir = SimtwinPaths::config_dir().unwrap();
        assert!(state_file.starts_with(&config_dir));
    }
}
