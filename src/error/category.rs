//! Error category classification.
//!
//! Categories decide how a failure is presented: whether it is worth
//! retrying by hand and which hint accompanies the message.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, timeout or socket failures talking to the platform.
    Network,

    /// Missing or rejected credentials.
    Auth,

    /// The platform answered with a 5xx.
    Server,

    /// The platform answered with something this client cannot decode.
    Client,

    /// The request was rejected because of its content (4xx other than auth).
    User,

    /// Local filesystem or OS failures.
    System,
}

impl ErrorCategory {
    /// Whether trying the same action again may succeed without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
        }
    }

    /// Suggested next step for the person at the keyboard.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection to the Glitch server and try again",
            ErrorCategory::Auth => "Log in again with `glitch login`",
            ErrorCategory::Server => "The server is having trouble. Try again in a moment",
            ErrorCategory::Client => "This client may be out of date with the server",
            ErrorCategory::User => "Check what you entered and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
