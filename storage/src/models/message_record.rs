//! Row model for the `messages` table.
//!
//! Converted into [`message_core::Message`] on the way out of the repository.

use chrono::{DateTime, Utc};
use message_core::{Message, Sender};

use crate::error::StorageError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    pub sender: String,
    pub processed_at: DateTime<Utc>,
}

impl TryFrom<MessageRecord> for Message {
    type Error = StorageError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        let sender: Sender = record.sender.parse().map_err(|e| {
            StorageError::Corrupt(format!("message {}: {}", record.message_id, e))
        })?;
        Ok(Message {
            message_id: record.message_id,
            session_id: record.session_id,
            content: record.content,
            sender,
            processed_at: record.processed_at,
        })
    }
}
