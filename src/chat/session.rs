use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::log::ChatLog;
use crate::error::ChatError;
use crate::models::ChatMessage;
use crate::session::SessionContext;
use crate::traits::{ChatConnection, ChatConnector, ChatRequest};
use crate::view_state::ErrorSlot;
use crate::websocket::{decode_chat_frame, OutgoingChat, WsConnectionState, USER_LEFT};

/// Lifecycle of a chat session as seen by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStatus {
    Closed,
    Connecting,
    Open,
    /// The transport lost the connection and is retrying.
    Reconnecting { attempt: u8 },
}

struct ActiveChat {
    stream: String,
    connection: Arc<dyn ChatConnection>,
    pump: JoinHandle<()>,
}

struct Shared {
    log: watch::Sender<ChatLog>,
    status: watch::Sender<ChatStatus>,
    errors: ErrorSlot,
    /// Bumped by every open and close; work tagged with an older value is dropped.
    generation: AtomicU64,
    active: Mutex<Option<ActiveChat>>,
}

impl Shared {
    fn active(&self) -> MutexGuard<'_, Option<ActiveChat>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn append(&self, generation: u64, raw: &str) {
        match decode_chat_frame(raw) {
            Ok(message) => {
                self.log.send_if_modified(|log| {
                    if !self.is_current(generation) {
                        return false;
                    }
                    log.push(message);
                    true
                });
            }
            Err(e) => {
                warn!("Dropping chat frame: {}", e);
                self.errors.set(e.to_string());
            }
        }
    }

    fn set_status(&self, generation: u64, status: ChatStatus) {
        self.status.send_if_modified(|current| {
            if !self.is_current(generation) || *current == status {
                return false;
            }
            *current = status;
            true
        });
    }

    /// Mirror a transport state change. Returns `false` once the
    /// connection is gone for good.
    fn apply_transport_state(&self, generation: u64, state: WsConnectionState) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        match state {
            WsConnectionState::Connected => {
                self.set_status(generation, ChatStatus::Open);
                true
            }
            WsConnectionState::Reconnecting { attempt } => {
                info!(attempt, "Chat reconnecting");
                self.set_status(generation, ChatStatus::Reconnecting { attempt });
                true
            }
            WsConnectionState::Disconnected => {
                self.set_status(generation, ChatStatus::Closed);
                false
            }
            WsConnectionState::Failed { reason } => {
                warn!("Chat connection failed: {}", reason);
                self.set_status(generation, ChatStatus::Closed);
                self.errors.set(reason);
                false
            }
        }
    }
}

/// The chat of one stream screen.
///
/// At most one connection is open at a time. Inbound frames are decoded
/// and appended to a bounded [`ChatLog`] by a single pump task; every
/// failure lands in the shared [`ErrorSlot`] instead of being returned.
pub struct ChatSession {
    shared: Arc<Shared>,
    connector: Arc<dyn ChatConnector>,
    session: SessionContext,
    chat_base_url: String,
}

impl ChatSession {
    pub fn new(
        connector: Arc<dyn ChatConnector>,
        session: SessionContext,
        chat_base_url: impl Into<String>,
        capacity: usize,
        errors: ErrorSlot,
    ) -> Self {
        let (log, _) = watch::channel(ChatLog::new(capacity));
        let (status, _) = watch::channel(ChatStatus::Closed);
        Self {
            shared: Arc::new(Shared {
                log,
                status,
                errors,
                generation: AtomicU64::new(0),
                active: Mutex::new(None),
            }),
            connector,
            session,
            chat_base_url: chat_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn chat_url(&self, stream: &str) -> String {
        format!(
            "{}/api/chat/{}",
            self.chat_base_url,
            urlencoding::encode(stream)
        )
    }

    /// Join the chat of `stream`, closing any chat already open.
    ///
    /// Starts from an empty log. Without a signed-in session, or if the
    /// handshake fails, the session stays `Closed` and the error slot is set.
    pub async fn open(&self, stream: &str) {
        self.close(USER_LEFT);
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(token) = self.session.token() else {
            warn!(stream, "Cannot join chat without a session");
            self.shared.errors.set(ChatError::MissingCredential.user_message());
            return;
        };

        self.shared.set_status(generation, ChatStatus::Connecting);
        let request = ChatRequest {
            url: self.chat_url(stream),
            token,
            stream: stream.to_string(),
        };

        let connection = match self.connector.connect(request).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!(stream, "Chat connection failed: {}", e);
                if self.shared.is_current(generation) {
                    self.shared.set_status(generation, ChatStatus::Closed);
                    self.shared.errors.set(e.user_message());
                }
                return;
            }
        };

        let mut active = self.shared.active();
        if !self.shared.is_current(generation) {
            debug!(stream, "Chat closed while connecting");
            connection.close(USER_LEFT);
            return;
        }

        let frames = connection.subscribe();
        let states = connection.state();
        self.shared.set_status(generation, ChatStatus::Open);
        let pump = tokio::spawn(pump(self.shared.clone(), generation, frames, states));
        info!(stream, "Joined chat");

        *active = Some(ActiveChat {
            stream: stream.to_string(),
            connection,
            pump,
        });
    }

    /// Decode one raw frame and append it to the log.
    ///
    /// A frame that does not decode sets the error slot and is dropped.
    pub fn handle_inbound(&self, raw: &str) {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        self.shared.append(generation, raw);
    }

    /// Send `text` to the open chat. Blank text, or no open connection,
    /// is a silent no-op; the message shows up when the server echoes it.
    pub async fn send(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if *self.shared.status.borrow() != ChatStatus::Open {
            debug!("Chat not open, message not sent");
            return;
        }

        let connection = self
            .shared
            .active()
            .as_ref()
            .map(|active| active.connection.clone());
        let Some(connection) = connection else {
            return;
        };

        if let Err(e) = connection.send(OutgoingChat::new(text)).await {
            warn!("Failed to send chat message: {}", e);
            self.shared.errors.set(e.user_message());
        }
    }

    /// Close the connection if any and clear the log. Idempotent.
    pub fn close(&self, reason: &str) {
        let (previous, generation) = {
            let mut active = self.shared.active();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (active.take(), generation)
        };

        if let Some(previous) = previous {
            info!(stream = %previous.stream, reason, "Leaving chat");
            previous.pump.abort();
            previous.connection.close(reason);
        }

        self.shared.log.send_if_modified(|log| {
            if log.is_empty() && log.total_received() == 0 {
                return false;
            }
            log.clear();
            true
        });
        self.shared.set_status(generation, ChatStatus::Closed);
    }

    pub fn status(&self) -> ChatStatus {
        self.shared.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ChatStatus> {
        self.shared.status.subscribe()
    }

    pub fn subscribe_log(&self) -> watch::Receiver<ChatLog> {
        self.shared.log.subscribe()
    }

    pub fn log(&self) -> ChatLog {
        self.shared.log.borrow().clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.shared.log.borrow().to_vec()
    }

    /// Stream whose chat is open, if any.
    pub fn active_stream(&self) -> Option<String> {
        self.shared
            .active()
            .as_ref()
            .map(|active| active.stream.clone())
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.shared.errors
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(active) = self.shared.active().take() {
            active.pump.abort();
            active.connection.close(USER_LEFT);
        }
    }
}

async fn pump(
    shared: Arc<Shared>,
    generation: u64,
    mut frames: broadcast::Receiver<String>,
    mut states: watch::Receiver<WsConnectionState>,
) {
    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Ok(raw) => shared.append(generation, &raw),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Chat reader fell behind, frames skipped");
                }
                Err(RecvError::Closed) => {
                    debug!("Chat frame channel closed");
                    break;
                }
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                if !shared.apply_transport_state(generation, state) {
                    break;
                }
            }
        }
    }
    debug!("Chat pump stopped");
}
