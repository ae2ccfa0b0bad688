//! Tungstenite-based chat transport.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::config::ReconnectPolicy;
use crate::error::ChatError;
use crate::traits::{ChatConnection, ChatConnector, ChatRequest};
use crate::websocket::{OutgoingChat, WsClient, WsClientConfig, WsConnectionState};

/// Opens a [`WsClient`] per request.
#[derive(Debug, Clone, Default)]
pub struct TungsteniteChatConnector {
    reconnect: ReconnectPolicy,
}

impl TungsteniteChatConnector {
    pub fn new(reconnect: ReconnectPolicy) -> Self {
        Self { reconnect }
    }
}

#[async_trait]
impl ChatConnector for TungsteniteChatConnector {
    async fn connect(&self, request: ChatRequest) -> Result<Arc<dyn ChatConnection>, ChatError> {
        let client = WsClient::connect(WsClientConfig::from_request(request, self.reconnect)).await?;
        Ok(Arc::new(client))
    }
}

#[async_trait]
impl ChatConnection for WsClient {
    async fn send(&self, msg: OutgoingChat) -> Result<(), ChatError> {
        WsClient::send(self, msg).await
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        WsClient::subscribe(self)
    }

    fn state(&self) -> watch::Receiver<WsConnectionState> {
        self.state_receiver()
    }

    fn close(&self, reason: &str) {
        self.shutdown(reason);
    }
}
