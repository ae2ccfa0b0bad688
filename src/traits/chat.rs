//! Chat transport abstraction.
//!
//! A [`ChatConnector`] opens one [`ChatConnection`] per stream. The
//! connection hands raw inbound frames to subscribers and reports its
//! lifecycle over a watch channel; decoding is left to the chat session.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::error::ChatError;
use crate::websocket::{OutgoingChat, WsConnectionState};

/// Everything needed to join one stream's chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Full `ws://` or `wss://` URL of the chat endpoint.
    pub url: String,
    pub token: String,
    /// Username of the stream's owner. Sent as the `chat` header.
    pub stream: String,
}

#[async_trait]
pub trait ChatConnector: Send + Sync {
    /// Perform the handshake. Fails if the server refuses the upgrade.
    async fn connect(&self, request: ChatRequest) -> Result<Arc<dyn ChatConnection>, ChatError>;
}

#[async_trait]
pub trait ChatConnection: Send + Sync {
    async fn send(&self, msg: OutgoingChat) -> Result<(), ChatError>;

    /// Raw text frames received after the call.
    fn subscribe(&self) -> broadcast::Receiver<String>;

    fn state(&self) -> watch::Receiver<WsConnectionState>;

    /// Close the socket with a normal closure and the given reason.
    fn close(&self, reason: &str);
}
