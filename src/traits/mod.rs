//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - REST transport
//! - [`ChatConnector`] / [`ChatConnection`] - chat WebSocket transport
//! - [`SessionStore`] - persisted session

pub mod chat;
pub mod http;
pub mod session_store;

pub use chat::{ChatConnection, ChatConnector, ChatRequest};
pub use http::{FilePart, Headers, HttpClient, HttpError, Response};
pub use session_store::{SessionStore, SessionStoreError};
