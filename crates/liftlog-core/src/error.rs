//! Core error types for liftlog-core.
//!
//! Storage, configuration and backend failures each get their own enum so
//! callers can tell a locked database from a rejected save. The timer itself
//! never surfaces these to the user; it logs and keeps counting.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for liftlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Slot storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Workout backend errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a persisted slot backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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

    /// Key not present in the configuration tree
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors talking to the workout backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport or decoding failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint path could not be joined onto the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Backend answered with a non-success status
    #[error("{endpoint} rejected the request: {message}")]
    Rejected { endpoint: String, message: String },
}

/// Failure to deliver a completion signal. Always non-fatal.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The device has no such capability
    #[error("{0} is not supported on this device")]
    Unsupported(&'static str),

    /// Delivery was attempted and failed
    #[error("Notification failed: {0}")]
    Failed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
