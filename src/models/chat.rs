use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A chat line broadcast by the server to everyone watching a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
    /// ISO-8601 timestamp, kept exactly as received.
    pub at: String,
}

impl ChatMessage {
    pub fn new(username: impl Into<String>, message: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            at: at.into(),
        }
    }

    /// Parsed timestamp, if `at` is RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.at).ok()
    }
}
