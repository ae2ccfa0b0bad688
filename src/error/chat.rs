//! Chat transport errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Not signed in")]
    MissingCredential,

    #[error("Invalid chat address: {0}")]
    InvalidAddress(String),

    #[error("Chat handshake failed: {0}")]
    HandshakeFailed(String),

    #[error("Disconnected from chat")]
    Disconnected,

    #[error("Chat connection lost after {attempts} reconnection attempts")]
    RetriesExhausted { attempts: u8 },

    #[error("Failed to send chat message: {0}")]
    SendFailed(String),

    #[error("Invalid chat message: {0}")]
    InvalidPayload(String),
}

impl ChatError {
    pub fn user_message(&self) -> String {
        match self {
            ChatError::MissingCredential => "Log in to join the chat".to_string(),
            ChatError::HandshakeFailed(_) | ChatError::InvalidAddress(_) => {
                "Could not connect to chat".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::MissingCredential => "E_CHAT_AUTH",
            ChatError::InvalidAddress(_) => "E_CHAT_URL",
            ChatError::HandshakeFailed(_) => "E_CHAT_HANDSHAKE",
            ChatError::Disconnected => "E_CHAT_CLOSED",
            ChatError::RetriesExhausted { .. } => "E_CHAT_RETRIES",
            ChatError::SendFailed(_) => "E_CHAT_SEND",
            ChatError::InvalidPayload(_) => "E_CHAT_PAYLOAD",
        }
    }
}
