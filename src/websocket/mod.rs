//! Chat WebSocket transport.
//!
//! One [`WsClient`] per joined stream. It reconnects on its own after a
//! drop, with exponential backoff, and reports progress through
//! [`WsConnectionState`].

pub mod client;
pub mod messages;

pub use client::{WsClient, WsClientConfig, WsConnectionState, CHAT_HEADER};
pub use messages::{decode_chat_frame, OutgoingChat, USER_LEFT};
