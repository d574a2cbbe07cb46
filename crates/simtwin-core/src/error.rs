//! Error types for the SimTwin application.

use thiserror::Error;

/// A shared error type for the entire SimTwin application.
///
/// Every failure surfaced to the user is normalized to one of these
/// variants; all of them render to a human-readable message and none
/// of them are fatal to the process.
#[derive(Error, Debug, Clone)]
pub enum TwinError {
    /// No simulation session has been initialized yet
    #[error("no active simulation session; run `simtwin init` first")]
    NoSession,

    /// Transport failure: no usable response was received from the backend
    #[error("failed to {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// Application failure: the backend answered with a non-success status
    #[error("failed to {operation}: HTTP {status} - {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Client-side validation failure for user-supplied parameters
    #[error("{0}")]
    InvalidParams(String),

    /// Local storage error (state file, config file)
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl TwinError {
    /// Creates a Transport error for the given backend operation.
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// Creates an Api error for the given backend operation.
    pub fn api(operation: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            operation,
            status,
            body: body.into(),
        }
    }

    /// Creates an InvalidParams error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for failures of a backend call (transport or non-success status).
    ///
    /// The step retry loop treats both kinds identically.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Api { .. })
    }
}

impl From<std::io::Error> for TwinError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TwinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TwinError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TwinError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, TwinError>`.
pub type Result<T> = std::result::Result<T, TwinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_includes_operation_status_and_body() {
        let err = TwinError::api("initialize simulation", 400, "Invalid model");
        assert_eq!(
            err.to_string(),
            "failed to initialize simulation: HTTP 400 - Invalid model"
        );
    }

    #[test]
    fn transport_error_is_prefixed_with_operation() {
        let err = TwinError::transport("step simulation", "connection refused");
        assert_eq!(
            err.to_string(),
            "failed to step simulation: connection refused"
        );
    }

    #[test]
    fn backend_failure_classification() {
        assert!(TwinError::transport("get state", "timeout").is_backend_failure());
        assert!(TwinError::api("get state", 500, "oops").is_backend_failure());
        assert!(!TwinError::NoSession.is_backend_failure());
        assert!(!TwinError::invalid_params("bad").is_backend_failure());
    }
}
