//! Core error types for microadventure-core.
//!
//! This module defines the error hierarchy using thiserror. Only
//! `NoContentAvailable` and `NoActivePrompt` are expected in normal use;
//! persistence failures in the completion flow are downgraded to
//! [`PersistenceWarning`]s so the session stays usable.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for microadventure-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The prompt list is empty or unavailable
    #[error("No adventures available")]
    NoContentAvailable,

    /// Completion or sharing requested with no prompt presented
    #[error("No adventure is currently active")]
    NoActivePrompt,

    /// A stored value could not be read or decoded
    #[error("Stored value for '{key}' is corrupt: {message}")]
    PersistenceReadCorrupt { key: String, message: String },

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

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

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open the store file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Store is not accepting reads or writes
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing a specific key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

impl From<StorageError> for PersistenceWarning {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::WriteFailed { key, message } => PersistenceWarning { key, message },
            other => PersistenceWarning::new("transaction", other),
        }
    }
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

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Non-fatal write failure reported alongside an updated state.
///
/// This is the only form a write failure takes outside the store: the
/// tracker and session hand it back next to their result instead of
/// returning an error.
///
/// The in-memory state that accompanies it is still valid for display,
/// but may not survive a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub key: String,
    pub message: String,
}

impl PersistenceWarning {
    pub fn new(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not persist '{}': {}", self.key, self.message)
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
