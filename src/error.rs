//! Structured error types for property sources.

use serde::Serialize;
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Medium errors
    IoError,

    // Misuse errors
    Unsupported,
    InvalidState,
    InvalidArgument,
}

/// Error raised by loading, saving or wiring property sources.
///
/// Missing or malformed values are never reported through this type; the
/// typed accessors resolve those to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing medium could not be read or written.
    #[error("I/O error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The source does not support the requested operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A structural precondition does not hold.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A caller supplied an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Io { .. } => ErrorCode::IoError,
            ConfigError::Unsupported(_) => ErrorCode::Unsupported,
            ConfigError::InvalidState(_) => ErrorCode::InvalidState,
            ConfigError::InvalidArgument(_) => ErrorCode::InvalidArgument,
        }
    }

    // Convenience constructors

    pub fn io(location: impl std::fmt::Display, source: io::Error) -> Self {
        ConfigError::Io {
            location: location.to_string(),
            source,
        }
    }

    pub fn unsupported(operation: &str, source_name: &str) -> Self {
        ConfigError::Unsupported(format!("{} is not supported by {}", operation, source_name))
    }

    pub fn no_sources() -> Self {
        ConfigError::InvalidState("no property source has been added".to_string())
    }

    pub fn resource_not_found(name: &str) -> Self {
        ConfigError::InvalidState(format!("bundled resource not found: {}", name))
    }

    pub fn blank_argument(field: &str) -> Self {
        ConfigError::InvalidArgument(format!("{} must not be blank", field))
    }
}

/// Result type for property source operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
