//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockChatConnector`] - chat transport with frame injection
//! - [`InMemorySessionStore`] - in-memory session storage

pub mod chat;
pub mod http;
pub mod session;

pub use chat::{MockChatConnection, MockChatConnector};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session::InMemorySessionStore;
