//! Transport-level failures of REST calls.

use std::fmt;

use crate::traits::HttpError;

/// A REST call that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Could not connect to the server.
    ConnectionFailed { url: String, message: String },

    /// The blanket request ceiling elapsed.
    Timeout { url: String },

    /// The request URL could not be built.
    InvalidUrl { url: String },

    /// Reading or writing the body failed mid-transfer.
    Io { message: String },

    /// Request was cancelled.
    Cancelled,

    Other { message: String },
}

impl NetworkError {
    /// Attach the request URL to a transport error.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
            },
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) => NetworkError::Io { message },
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the Glitch server. Please check your connection.".to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            NetworkError::InvalidUrl { url } => format!("Invalid server address: {}", url),
            NetworkError::Io { message } => format!("Connection interrupted: {}", message),
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Io { .. } => "E_NET_IO",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url } => write!(f, "Request to '{}' timed out", url),
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL '{}'", url),
            NetworkError::Io { message } => write!(f, "I/O error: {}", message),
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
