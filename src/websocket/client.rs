use std::borrow::Cow;
use std::sync::Mutex;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::{header::AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::messages::OutgoingChat;
use crate::config::ReconnectPolicy;
use crate::error::ChatError;
use crate::traits::ChatRequest;

/// Header naming the stream whose chat is joined.
pub const CHAT_HEADER: &str = "chat";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// WebSocket connection state
#[derive(Debug, Clone, PartialEq)]
pub enum WsConnectionState {
    Connected,
    Reconnecting { attempt: u8 },
    /// Closed on request.
    Disconnected,
    /// Dropped and not recovered.
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct WsClientConfig {
    pub url: String,
    pub token: String,
    pub stream: String,
    pub reconnect: ReconnectPolicy,
}

impl WsClientConfig {
    pub fn from_request(request: ChatRequest, reconnect: ReconnectPolicy) -> Self {
        Self {
            url: request.url,
            token: request.token,
            stream: request.stream,
            reconnect,
        }
    }

    fn build_request(&self) -> Result<Request, ChatError> {
        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| ChatError::InvalidAddress(e.to_string()))?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| ChatError::HandshakeFailed(e.to_string()))?;
        let stream = HeaderValue::from_str(&self.stream)
            .map_err(|e| ChatError::HandshakeFailed(e.to_string()))?;

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CHAT_HEADER, stream);
        Ok(request)
    }
}

/// Chat socket for one stream.
///
/// A background task owns the socket. Outbound frames reach it over an
/// mpsc channel; inbound text frames are broadcast to subscribers.
pub struct WsClient {
    outgoing_tx: mpsc::Sender<OutgoingChat>,
    incoming_tx: broadcast::Sender<String>,
    /// Receiver created before the loop starts so early frames are kept.
    first_rx: Mutex<Option<broadcast::Receiver<String>>>,
    state_rx: watch::Receiver<WsConnectionState>,
    /// `Some(reason)` once a close was requested.
    shutdown_tx: watch::Sender<Option<String>>,
}

impl WsClient {
    /// Perform the handshake and start the connection task.
    pub async fn connect(config: WsClientConfig) -> Result<Self, ChatError> {
        let request = config.build_request()?;
        let (ws, _response) = connect_async(request)
            .await
            .map_err(|e| ChatError::HandshakeFailed(e.to_string()))?;

        info!(stream = %config.stream, "Connected to chat at {}", config.url);

        let (ws_sink, ws_source) = ws.split();

        let (incoming_tx, first_rx) = broadcast::channel::<String>(256);
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<OutgoingChat>(64);
        let (state_tx, state_rx) = watch::channel(WsConnectionState::Connected);
        let (shutdown_tx, shutdown_rx) = watch::channel::<Option<String>>(None);

        tokio::spawn(run_connection_loop(
            config,
            ws_sink,
            ws_source,
            incoming_tx.clone(),
            outgoing_rx,
            state_tx,
            shutdown_rx,
        ));

        Ok(Self {
            outgoing_tx,
            incoming_tx,
            first_rx: Mutex::new(Some(first_rx)),
            state_rx,
            shutdown_tx,
        })
    }

    pub fn is_connected(&self) -> bool {
        matches!(*self.state_rx.borrow(), WsConnectionState::Connected)
    }

    pub fn connection_state(&self) -> WsConnectionState {
        self.state_rx.borrow().clone()
    }

    pub fn state_receiver(&self) -> watch::Receiver<WsConnectionState> {
        self.state_rx.clone()
    }

    /// Inbound text frames. The first call also sees frames that arrived
    /// before it was made.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        let stashed = match self.first_rx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        stashed.unwrap_or_else(|| self.incoming_tx.subscribe())
    }

    /// Queue a frame for the connection task.
    pub async fn send(&self, msg: OutgoingChat) -> Result<(), ChatError> {
        self.outgoing_tx
            .send(msg)
            .await
            .map_err(|_| ChatError::Disconnected)
    }

    /// Close with a normal closure frame carrying `reason`.
    pub fn shutdown(&self, reason: &str) {
        self.shutdown_tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            info!("Closing chat connection: {}", reason);
            *current = Some(reason.to_string());
            true
        });
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.shutdown("Client dropped");
    }
}

enum LoopExit {
    Reconnect,
    Stop,
}

async fn run_connection_loop(
    config: WsClientConfig,
    mut ws_sink: WsSink,
    mut ws_source: WsSource,
    incoming_tx: broadcast::Sender<String>,
    mut outgoing_rx: mpsc::Receiver<OutgoingChat>,
    state_tx: watch::Sender<WsConnectionState>,
    mut shutdown_rx: watch::Receiver<Option<String>>,
) {
    loop {
        let next = tokio::select! {
            _ = shutdown_rx.changed() => LoopExit::Stop,
            msg = ws_source.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!(len = text.len(), "Chat frame received");
                        // No subscribers is fine; the frame is simply dropped.
                        let _ = incoming_tx.send(text);
                        continue;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                        continue;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(?frame, "Server closed chat connection");
                        LoopExit::Reconnect
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("Chat socket error: {}", e);
                        LoopExit::Reconnect
                    }
                    None => {
                        info!("Chat stream ended");
                        LoopExit::Reconnect
                    }
                }
            }
            outgoing = outgoing_rx.recv() => {
                match outgoing {
                    Some(chat) => {
                        match chat.to_frame() {
                            Ok(frame) => {
                                debug!("Sending chat frame");
                                if let Err(e) = ws_sink.send(Message::Text(frame)).await {
                                    warn!("Failed to send chat frame: {}", e);
                                }
                            }
                            Err(e) => error!("Failed to encode chat frame: {}", e),
                        }
                        continue;
                    }
                    None => LoopExit::Stop,
                }
            }
        };

        match next {
            LoopExit::Stop => {
                let reason = shutdown_rx
                    .borrow()
                    .clone()
                    .unwrap_or_else(|| "Client dropped".to_string());
                let frame = CloseFrame {
                    code: CloseCode::Normal,
                    reason: Cow::Owned(reason),
                };
                if let Err(e) = ws_sink.send(Message::Close(Some(frame))).await {
                    debug!("Close frame not delivered: {}", e);
                }
                state_tx.send_replace(WsConnectionState::Disconnected);
                break;
            }
            LoopExit::Reconnect => {
                match attempt_reconnect(&config, &state_tx, &mut shutdown_rx).await {
                    Reconnect::Connected(new_sink, new_source) => {
                        ws_sink = new_sink;
                        ws_source = new_source;
                        state_tx.send_replace(WsConnectionState::Connected);
                    }
                    Reconnect::ShutDown => {
                        state_tx.send_replace(WsConnectionState::Disconnected);
                        break;
                    }
                    Reconnect::GaveUp => {
                        let reason = ChatError::RetriesExhausted {
                            attempts: config.reconnect.max_retries,
                        }
                        .to_string();
                        state_tx.send_replace(WsConnectionState::Failed { reason });
                        break;
                    }
                }
            }
        }
    }

    info!("Chat connection loop ended");
}

enum Reconnect {
    Connected(WsSink, WsSource),
    ShutDown,
    GaveUp,
}

/// Reconnect with exponential backoff, giving up after `max_retries`.
async fn attempt_reconnect(
    config: &WsClientConfig,
    state_tx: &watch::Sender<WsConnectionState>,
    shutdown_rx: &mut watch::Receiver<Option<String>>,
) -> Reconnect {
    let policy = config.reconnect;

    for attempt in 1..=policy.max_retries {
        if shutdown_rx.borrow().is_some() {
            return Reconnect::ShutDown;
        }

        state_tx.send_replace(WsConnectionState::Reconnecting { attempt });

        let backoff = policy.backoff_for(attempt);
        info!(
            "Reconnection attempt {} of {}, waiting {:?}",
            attempt, policy.max_retries, backoff
        );

        tokio::select! {
            _ = tokio::time::sleep(backoff) => {}
            _ = shutdown_rx.changed() => {
                debug!("Shutdown requested during backoff");
                return Reconnect::ShutDown;
            }
        }

        let request = match config.build_request() {
            Ok(r) => r,
            Err(e) => {
                error!("Cannot rebuild chat request: {}", e);
                return Reconnect::GaveUp;
            }
        };

        match connect_async(request).await {
            Ok((ws, _)) => {
                info!("Reconnected to chat on attempt {}", attempt);
                let (sink, source) = ws.split();
                return Reconnect::Connected(sink, source);
            }
            Err(e) => warn!("Reconnection attempt {} failed: {}", attempt, e),
        }
    }

    error!(
        "Failed to reconnect after {} attempts, giving up",
        policy.max_retries
    );
    Reconnect::GaveUp
}
