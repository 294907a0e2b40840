//! Query parameters for listing and searching messages of a session.
//!
//! Used by [`crate::MessageStore::list_by_session`] and
//! [`crate::MessageStore::search_by_session`].

use message_core::Sender;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuery {
    pub session_id: String,
    pub sender: Option<Sender>,
    pub limit: u32,
    /// Pagination offset (applied before limit).
    pub offset: u32,
}

impl MessageQuery {
    pub fn new(session_id: impl Into<String>, limit: u32, offset: u32) -> Self {
        Self {
            session_id: session_id.into(),
            sender: None,
            limit,
            offset,
        }
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub session_id: String,
    /// Text to look for; matched case-insensitively as a substring.
    pub text: String,
    pub limit: u32,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>, limit: u32, offset: u32) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
            limit,
            offset,
        }
    }
}
