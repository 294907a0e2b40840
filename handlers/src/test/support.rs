//! Shared fixtures for service tests: in-memory store, stepping clock, and a
//! store that always fails.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use message_core::{Message, MessageInput, StepClock};
use storage::{InMemoryMessageStore, MessageQuery, MessageStore, SearchQuery, StorageError};

use crate::{CensorshipConfig, CensorshipFilter, MessageService, QueryConfig, QueryService};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 23, 14, 30, 0).unwrap()
}

pub fn services_with(store: Arc<dyn MessageStore>) -> (MessageService, QueryService) {
    let filter = Arc::new(CensorshipFilter::new(&CensorshipConfig::default()).unwrap());
    let clock = Arc::new(StepClock::new(start_time(), Duration::milliseconds(1)));
    (
        MessageService::new(Arc::clone(&store), filter, clock),
        QueryService::new(store, QueryConfig::default()),
    )
}

pub fn services() -> (MessageService, QueryService) {
    services_with(Arc::new(InMemoryMessageStore::new()))
}

pub fn input(id: &str, session: &str, content: &str, sender: &str) -> MessageInput {
    MessageInput::new(id, session, content, sender)
}

/// Store whose every operation fails with a database error.
pub struct FailingStore;

#[async_trait]
impl MessageStore for FailingStore {
    async fn insert(&self, _message: Message) -> Result<Message, StorageError> {
        Err(StorageError::Database("disk I/O error at /var/lib/messages.db".to_string()))
    }

    async fn list_by_session(&self, _query: &MessageQuery) -> Result<Vec<Message>, StorageError> {
        Err(StorageError::Database("connection reset".to_string()))
    }

    async fn search_by_session(&self, _query: &SearchQuery) -> Result<Vec<Message>, StorageError> {
        Err(StorageError::Database("connection reset".to_string()))
    }
}
