use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::models::ChatMessage;

/// Close reason sent when the viewer leaves a stream.
pub const USER_LEFT: &str = "User left";

/// Frame sent to the server. The server stamps author and time itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingChat {
    pub message: String,
}

impl OutgoingChat {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn to_frame(&self) -> Result<String, ChatError> {
        serde_json::to_string(self).map_err(|e| ChatError::InvalidPayload(e.to_string()))
    }
}

/// Decode a broadcast frame `{username, message, at}`.
pub fn decode_chat_frame(raw: &str) -> Result<ChatMessage, ChatError> {
    serde_json::from_str(raw).map_err(|e| ChatError::InvalidPayload(e.to_string()))
}
