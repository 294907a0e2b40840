//! # Message Storage
//!
//! The [`MessageStore`] trait is the only seam between the services and the
//! backing engine. Two implementations ship with this crate:
//!
//! - [`crate::MessageRepository`]: SQLite via sqlx, durable.
//! - [`crate::InMemoryMessageStore`]: `RwLock`-guarded vector, for tests and
//!   throwaway instances.
//!
//! ## Contract
//!
//! - `insert` fails with [`StorageError::Duplicate`] when the `message_id`
//!   exists. The uniqueness check and the write are one atomic step in the
//!   backend (primary key / single write lock).
//! - `list_by_session` and `search_by_session` return records in insertion
//!   order, apply `offset` then `limit`, and return an empty vector when
//!   nothing matches.
//! - Search is a case-insensitive substring match on the stored content.

use async_trait::async_trait;
use message_core::Message;

use crate::error::StorageError;
use crate::models::{MessageQuery, SearchQuery};

/// Append-and-query store for messages, keyed by session.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a new message and returns the stored record.
    async fn insert(&self, message: Message) -> Result<Message, StorageError>;

    /// Messages of one session, optionally filtered by sender.
    async fn list_by_session(&self, query: &MessageQuery) -> Result<Vec<Message>, StorageError>;

    /// Messages of one session whose content contains the query text.
    async fn search_by_session(&self, query: &SearchQuery) -> Result<Vec<Message>, StorageError>;
}

/// Lowercased form used for substring search, shared by both backends.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
