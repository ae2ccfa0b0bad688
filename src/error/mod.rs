//! Error handling for the Glitch client.
//!
//! Every fallible operation returns [`GlitchResult`]. The unified
//! [`GlitchError`] wraps one domain error per failure source:
//!
//! | Variant | Source | Category |
//! |---------|--------|----------|
//! | Network | transport, timeouts | Network |
//! | Api | non-2xx response | Auth / Server / User |
//! | Decode | unexpected body or chat frame | Client |
//! | Auth | no session, session file I/O | Auth / System |
//! | Chat | WebSocket transport | Network |
//! | System | local files | System |
//!
//! View state holders never propagate these; they turn them into the
//! screen's error string with [`DescribeFailure::describe`].

mod api;
mod auth;
mod category;
mod chat;
mod glitch_error;
mod network;
mod result;
mod system;

pub use api::{resolve_error_message, ApiError, ErrorBody, UNKNOWN_ERROR};
pub use auth::AuthError;
pub use category::ErrorCategory;
pub use chat::ChatError;
pub use glitch_error::GlitchError;
pub use network::NetworkError;
pub use result::{DescribeFailure, GlitchResult};
pub use system::{classify_io_error, SystemError};
