//! # In-Memory Message Store
//!
//! Non-durable [`MessageStore`] for tests and throwaway instances. Messages are
//! kept in a vector in insertion order; a set of ids backs the uniqueness
//! check. Both are updated under one write lock, so a duplicate check and a
//! conflicting insert cannot interleave.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use message_core::Message;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{MessageQuery, SearchQuery};
use crate::store::{fold_case, MessageStore};

#[derive(Debug, Default)]
struct Inner {
    messages: Vec<Message>,
    ids: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages in the store.
    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn page<'a>(
    matches: impl Iterator<Item = &'a Message>,
    limit: u32,
    offset: u32,
) -> Vec<Message> {
    matches
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: Message) -> Result<Message, StorageError> {
        let mut inner = self.inner.write().await;
        if !inner.ids.insert(message.message_id.clone()) {
            return Err(StorageError::Duplicate(message.message_id));
        }
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn list_by_session(&self, query: &MessageQuery) -> Result<Vec<Message>, StorageError> {
        let inner = self.inner.read().await;
        let matches = inner.messages.iter().filter(|m| {
            m.session_id == query.session_id && query.sender.map_or(true, |s| m.sender == s)
        });
        Ok(page(matches, query.limit, query.offset))
    }

    async fn search_by_session(&self, query: &SearchQuery) -> Result<Vec<Message>, StorageError> {
        let needle = fold_case(&query.text);
        let inner = self.inner.read().await;
        let matches = inner
            .messages
            .iter()
            .filter(|m| m.session_id == query.session_id && fold_case(&m.content).contains(&needle));
        Ok(page(matches, query.limit, query.offset))
    }
}
