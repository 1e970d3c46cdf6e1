//! Error types for the expense store

use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Caller-supplied data failed a precondition; raised before any
    /// write is attempted
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The offending field ("amount", "category", "date")
        field: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// The underlying database could not be opened or migrated
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Structured setting value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
