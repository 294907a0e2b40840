//! Read path: paginated listing and substring search within a session.
//!
//! An unknown session and a session without matches both yield an empty list.

use std::sync::Arc;

use message_core::{FieldError, Message, Result, ValidationErrors};
use storage::{MessageQuery, MessageStore, SearchQuery};
use tracing::{debug, instrument};

use crate::message_service::storage_failure;
use crate::validation::{pagination_value, parse_sender, require_non_empty};

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_OFFSET: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Minimum length of a trimmed search query, in characters.
    pub search_min_chars: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_min_chars: 1,
        }
    }
}

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn MessageStore>,
    config: QueryConfig,
}

impl QueryService {
    pub fn new(store: Arc<dyn MessageStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// Lists messages of `session_id` in insertion order. An empty `sender`
    /// string means no sender filter.
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        session_id: &str,
        sender: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Message>> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "session_id", session_id);

        let sender = match sender.filter(|s| !s.is_empty()).map(parse_sender).transpose() {
            Ok(sender) => sender,
            Err(e) => {
                errors.push(e.field, e.reason);
                None
            }
        };
        let limit = take_or_record(&mut errors, pagination_value("limit", limit, DEFAULT_LIMIT));
        let offset = take_or_record(&mut errors, pagination_value("offset", offset, DEFAULT_OFFSET));
        errors.into_result()?;

        let query = MessageQuery {
            session_id: session_id.to_string(),
            sender,
            limit,
            offset,
        };
        let messages = self.store.list_by_session(&query).await.map_err(storage_failure)?;
        debug!(count = messages.len(), "Listed messages");
        Ok(messages)
    }

    /// Messages of `session_id` containing `q`, case-insensitively. The length
    /// checks look at `q` trimmed; matching uses `q` as given, surrounding
    /// spaces included.
    #[instrument(skip(self))]
    pub async fn search_messages(
        &self,
        session_id: &str,
        q: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Message>> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "session_id", session_id);

        let trimmed = q.trim();
        if trimmed.is_empty() {
            errors.push("q", "must not be empty");
        } else if trimmed.chars().count() < self.config.search_min_chars {
            errors.push(
                "q",
                format!("must be at least {} characters", self.config.search_min_chars),
            );
        }
        let limit = take_or_record(&mut errors, pagination_value("limit", limit, DEFAULT_LIMIT));
        let offset = take_or_record(&mut errors, pagination_value("offset", offset, DEFAULT_OFFSET));
        errors.into_result()?;

        let query = SearchQuery {
            session_id: session_id.to_string(),
            text: q.to_string(),
            limit,
            offset,
        };
        let messages = self.store.search_by_session(&query).await.map_err(storage_failure)?;
        debug!(count = messages.len(), "Searched messages");
        Ok(messages)
    }
}

fn take_or_record(errors: &mut ValidationErrors, value: std::result::Result<u32, FieldError>) -> u32 {
    match value {
        Ok(v) => v,
        Err(e) => {
            errors.push(e.field, e.reason);
            0
        }
    }
}
