//! Mock chat transport for testing.
//!
//! [`MockChatConnector`] records every connection request and hands out
//! [`MockChatConnection`]s. Tests inject inbound frames and read back what
//! the client sent.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};

use crate::error::ChatError;
use crate::traits::{ChatConnection, ChatConnector, ChatRequest};
use crate::websocket::{OutgoingChat, WsConnectionState};

#[derive(Clone)]
pub struct MockChatConnection {
    incoming_tx: broadcast::Sender<String>,
    state_tx: Arc<watch::Sender<WsConnectionState>>,
    sent: Arc<Mutex<Vec<OutgoingChat>>>,
    close_reasons: Arc<Mutex<Vec<String>>>,
    send_should_fail: Arc<Mutex<bool>>,
}

impl MockChatConnection {
    pub fn new() -> Self {
        let (incoming_tx, _) = broadcast::channel(100);
        let (state_tx, _) = watch::channel(WsConnectionState::Connected);
        Self {
            incoming_tx,
            state_tx: Arc::new(state_tx),
            sent: Arc::new(Mutex::new(Vec::new())),
            close_reasons: Arc::new(Mutex::new(Vec::new())),
            send_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Deliver a raw frame to current subscribers.
    pub fn inject_frame(&self, raw: &str) {
        let _ = self.incoming_tx.send(raw.to_string());
    }

    pub fn set_state(&self, state: WsConnectionState) {
        self.state_tx.send_replace(state);
    }

    pub fn set_send_should_fail(&self, should_fail: bool) {
        *self.send_should_fail.lock().unwrap() = should_fail;
    }

    pub fn sent_messages(&self) -> Vec<OutgoingChat> {
        self.sent.lock().unwrap().clone()
    }

    pub fn close_reasons(&self) -> Vec<String> {
        self.close_reasons.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        !self.close_reasons.lock().unwrap().is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.incoming_tx.receiver_count()
    }
}

impl Default for MockChatConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatConnection for MockChatConnection {
    async fn send(&self, msg: OutgoingChat) -> Result<(), ChatError> {
        if *self.send_should_fail.lock().unwrap() {
            return Err(ChatError::SendFailed("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.incoming_tx.subscribe()
    }

    fn state(&self) -> watch::Receiver<WsConnectionState> {
        self.state_tx.subscribe()
    }

    fn close(&self, reason: &str) {
        self.close_reasons.lock().unwrap().push(reason.to_string());
        self.state_tx.send_replace(WsConnectionState::Disconnected);
    }
}

#[derive(Clone, Default)]
pub struct MockChatConnector {
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    connections: Arc<Mutex<Vec<MockChatConnection>>>,
    connect_should_fail: Arc<Mutex<bool>>,
}

impl MockChatConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connect_should_fail(&self, should_fail: bool) {
        *self.connect_should_fail.lock().unwrap() = should_fail;
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn connections(&self) -> Vec<MockChatConnection> {
        self.connections.lock().unwrap().clone()
    }

    pub fn last_connection(&self) -> Option<MockChatConnection> {
        self.connections.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatConnector for MockChatConnector {
    async fn connect(&self, request: ChatRequest) -> Result<Arc<dyn ChatConnection>, ChatError> {
        self.requests.lock().unwrap().push(request);
        if *self.connect_should_fail.lock().unwrap() {
            return Err(ChatError::HandshakeFailed("mock handshake refused".to_string()));
        }
        let connection = MockChatConnection::new();
        self.connections.lock().unwrap().push(connection.clone());
        Ok(Arc::new(connection))
    }
}
