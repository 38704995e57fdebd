//! Core error types for timechallenge-core.
//!
//! This module defines the error hierarchy using thiserror. Challenge errors
//! are programmer-visible misuse (wrong transition, bad duration) and are
//! never retried; config errors wrap the TOML file layer.

use std::path::PathBuf;
use thiserror::Error;

use crate::challenge::RunState;

/// Core error type for timechallenge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Challenge lifecycle errors
    #[error("Challenge error: {0}")]
    Challenge(#[from] ChallengeError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operation that was attempted on a challenge controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    Stop,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Start => f.write_str("start"),
            Operation::Stop => f.write_str("stop"),
        }
    }
}

/// Challenge lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChallengeError {
    /// `start` while running, or `stop` while idle/resolved
    #[error("cannot {operation} a challenge that is {state}")]
    InvalidStateTransition { operation: Operation, state: RunState },

    /// Target time must be strictly positive
    #[error("invalid duration: {secs} seconds (must be positive and finite)")]
    InvalidDuration { secs: f64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_operation_and_state() {
        let err = ChallengeError::InvalidStateTransition {
            operation: Operation::Stop,
            state: RunState::Idle,
        };
        assert_eq!(err.to_string(), "cannot stop a challenge that is idle");
    }

    #[test]
    fn challenge_error_converts_into_core_error() {
        let err: CoreError = ChallengeError::InvalidDuration { secs: 0.0 }.into();
        assert!(matches!(
            err,
            CoreError::Challenge(ChallengeError::InvalidDuration { .. })
        ));
    }
}
