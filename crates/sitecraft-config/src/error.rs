//! Configuration and storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Durable key-value storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend refuses writes (quota exceeded, read-only medium).
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

/// Configuration update failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A path-based update was given no segments.
    #[error("configuration path is empty")]
    EmptyPath,

    /// A path segment does not name an existing field.
    #[error("unknown configuration path: {path}")]
    UnknownPath { path: String },

    /// The value does not decode into the field's type.
    #[error("invalid value for {path}")]
    InvalidValue {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration could not be turned into JSON.
    #[error("failed to serialize configuration")]
    Serialization(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A string did not name any variant of a configuration enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
