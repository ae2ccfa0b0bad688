//! Concrete implementations of the traits in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungsteniteChatConnector`] - chat WebSocket using tokio-tungstenite
//! - [`FileSessionStore`] - session kept in `~/.glitch/session.json`
//!
//! The [`mock`] submodule provides test doubles for all of them.

pub mod file_session;
pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_chat;

pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockChatConnector, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use tungstenite_chat::TungsteniteChatConnector;
