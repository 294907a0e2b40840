//! Core types: sender tag, inbound message input, and the persisted message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Originator of a message: the end user or the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

impl Sender {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::System => "system",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the recognized sender tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSender(pub String);

impl fmt::Display for UnknownSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sender '{}', expected 'user' or 'system'", self.0)
    }
}

impl std::error::Error for UnknownSender {}

impl FromStr for Sender {
    type Err = UnknownSender;

    /// Exact, case-sensitive match against `user` / `system`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "system" => Ok(Sender::System),
            other => Err(UnknownSender(other.to_string())),
        }
    }
}

/// Unvalidated create request. Missing fields deserialize as empty strings so
/// that validation reports them by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInput {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender: String,
}

impl MessageInput {
    pub fn new(
        message_id: impl Into<String>,
        session_id: impl Into<String>,
        content: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            session_id: session_id.into(),
            content: content.into(),
            sender: sender.into(),
        }
    }
}

/// A persisted message. `content` is the filtered text; `processed_at` is
/// assigned by the server when the record is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    pub sender: Sender,
    #[serde(with = "rfc3339_utc")]
    pub processed_at: DateTime<Utc>,
}

/// Serializes timestamps as RFC 3339 with a `Z` suffix and microsecond precision.
mod rfc3339_utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
