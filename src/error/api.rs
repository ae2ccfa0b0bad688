//! Non-2xx responses from the Glitch REST API.

use std::fmt;

use serde::Deserialize;

/// Fallback text when the error body carries nothing readable.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Error body the server sends alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

/// Pick the human-readable message out of a raw error body.
///
/// Precedence: `message`, then `error`, then the raw text when it is not
/// JSON at all, then [`UNKNOWN_ERROR`].
pub fn resolve_error_message(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => {
            let body: ErrorBody = serde_json::from_value(value).unwrap_or_default();
            body.message
                .filter(|m| !m.trim().is_empty())
                .or(body.error.filter(|e| !e.trim().is_empty()))
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
        }
        Err(_) => trimmed.to_string(),
    }
}

/// The server answered, but not with success.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub body: Option<ErrorBody>,
}

impl ApiError {
    pub fn from_response(status: u16, raw_body: &str) -> Self {
        Self {
            status,
            message: resolve_error_message(raw_body),
            body: serde_json::from_str(raw_body.trim()).ok(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    pub fn user_message(&self) -> String {
        self.message.clone()
    }

    pub fn error_code(&self) -> &'static str {
        match self.status {
            401 | 403 => "E_API_AUTH",
            404 => "E_API_NOT_FOUND",
            409 => "E_API_CONFLICT",
            400..=499 => "E_API_CLIENT",
            500..=599 => "E_API_SERVER",
            _ => "E_API_STATUS",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
