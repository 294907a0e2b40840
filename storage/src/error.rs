//! Storage error types.
//!
//! Used by [`crate::MessageStore`] implementations and their callers.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A record with this `message_id` already exists.
    #[error("Already exists: {0}")]
    Duplicate(String),
    #[error("Database error: {0}")]
    Database(String),
    /// A persisted row could not be decoded back into a message.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}
