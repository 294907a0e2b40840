//! Create path: validate, censor, stamp, persist.

use std::sync::Arc;

use message_core::{Clock, Message, MessageInput, Result, ServiceError};
use storage::{MessageStore, StorageError};
use tracing::{error, info, instrument};

use crate::censorship::CensorshipFilter;
use crate::validation::validate_input;

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    filter: Arc<CensorshipFilter>,
    clock: Arc<dyn Clock>,
}

impl MessageService {
    pub fn new(
        store: Arc<dyn MessageStore>,
        filter: Arc<CensorshipFilter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            filter,
            clock,
        }
    }

    /// Validates `input`, masks forbidden words in its content and persists it
    /// with a fresh `processed_at`. Nothing is written when validation fails.
    #[instrument(skip(self, input), fields(message_id = %input.message_id, session_id = %input.session_id))]
    pub async fn create(&self, input: MessageInput) -> Result<Message> {
        let validated = validate_input(input)?;

        let report = self.filter.inspect(&validated.content);
        if !report.flagged.is_empty() {
            info!(
                length = report.original_length,
                flagged = ?report.flagged,
                "Masked forbidden words"
            );
        }

        let message = Message {
            message_id: validated.message_id,
            session_id: validated.session_id,
            content: report.content,
            sender: validated.sender,
            processed_at: self.clock.now(),
        };

        let stored = self.store.insert(message).await.map_err(storage_failure)?;
        info!(sender = %stored.sender, "Message stored");
        Ok(stored)
    }
}

/// Maps store errors to service errors; only duplicates are visible to callers.
pub(crate) fn storage_failure(e: StorageError) -> ServiceError {
    match e {
        StorageError::Duplicate(message_id) => ServiceError::Conflict { message_id },
        other => {
            error!(error = %other, "Storage failure");
            ServiceError::Internal(other.to_string())
        }
    }
}
