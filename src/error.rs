//! Error types for qgate operations.
//!
//! This module defines [`GateError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A tool exiting non-zero is *not* an error; it becomes a step outcome
//! - Use `GateError` for conditions that prevent a step from observing a result
//! - Use `anyhow::Error` (via `GateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for qgate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The isolated environment could not be created or used.
    #[error("Virtual environment error at {path}: {message}")]
    EnvironmentError { path: PathBuf, message: String },

    /// An external command could not be started.
    #[error("Failed to run '{command}': {message}")]
    CommandFailed { command: String, message: String },

    /// A source scan could not complete.
    #[error("Scan of {path} failed: {message}")]
    ScanError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for qgate operations.
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = GateError::ConfigNotFound {
            path: PathBuf::from("/foo/.qgate.yml"),
        };
        assert!(err.to_string().contains("/foo/.qgate.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = GateError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = GateError::ConfigValidationError {
            message: "tools.lint must not be empty".into(),
        };
        assert!(err.to_string().contains("tools.lint must not be empty"));
    }

    #[test]
    fn environment_error_displays_path_and_message() {
        let err = GateError::EnvironmentError {
            path: PathBuf::from("venv"),
            message: "create command exited with code 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("venv"));
        assert!(msg.contains("exited with code 1"));
    }

    #[test]
    fn command_failed_displays_command_and_message() {
        let err = GateError::CommandFailed {
            command: "mypy src --strict".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mypy src --strict"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn scan_error_displays_path() {
        let err = GateError::ScanError {
            path: PathBuf::from("pkg/broken"),
            message: "permission denied".into(),
        };
        assert!(err.to_string().contains("pkg/broken"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GateError = io_err.into();
        assert!(matches!(err, GateError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(GateError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
