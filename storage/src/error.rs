//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs.

use thiserror::Error;
use tracker_core::TrackerError;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::AlreadyExists(db.message().to_string())
            }
            _ => StorageError::Database(e.to_string()),
        }
    }
}

impl From<StorageError> for TrackerError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(what) => TrackerError::NotFound(what),
            other => TrackerError::Store(other.to_string()),
        }
    }
}
