//! Client configuration.
//!
//! Use the builder methods to customize, or [`ClientConfig::from_env`] to
//! pick up `GLITCH_*` overrides.
//!
//! ```ignore
//! let config = ClientConfig::default()
//!     .with_api_base_url("https://glitch.example")
//!     .with_chat_log_capacity(200);
//! assert_eq!(config.chat_base_url(), "wss://glitch.example");
//! ```

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "http://arch.local:8989";
pub const DEFAULT_CHAT_LOG_CAPACITY: usize = 500;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "GLITCH_API_URL";
pub const ENV_CHAT_URL: &str = "GLITCH_CHAT_URL";
pub const ENV_CHAT_LOG_CAPACITY: &str = "GLITCH_CHAT_LOG_CAPACITY";

/// How the chat transport retries a dropped connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Attempts before giving up (0 disables reconnection).
    pub max_retries: u8,
    /// Upper bound for a single wait.
    pub max_backoff_secs: u64,
    /// Wait before the first attempt; doubled for each further attempt.
    pub base_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            max_backoff_secs: 30,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl ReconnectPolicy {
    /// Wait before reconnection `attempt` (1-based): 1s, 2s, 4s, ... capped.
    pub fn backoff_for(&self, attempt: u8) -> Duration {
        let exponent = u32::from(attempt.saturating_sub(1)).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        delay.min(Duration::from_secs(self.max_backoff_secs))
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Explicit chat base; derived from `api_base_url` when `None`.
    pub chat_base_url: Option<String>,
    pub request_timeout: Duration,
    pub chat_log_capacity: usize,
    pub reconnect: ReconnectPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            chat_base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            chat_log_capacity: DEFAULT_CHAT_LOG_CAPACITY,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_base(url.into());
        self
    }

    pub fn with_chat_base_url(mut self, url: impl Into<String>) -> Self {
        self.chat_base_url = Some(trim_base(url.into()));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Capacity is at least one message.
    pub fn with_chat_log_capacity(mut self, capacity: usize) -> Self {
        self.chat_log_capacity = capacity.max(1);
        self
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// Base URL of the chat endpoint (`ws://` or `wss://`).
    pub fn chat_base_url(&self) -> String {
        match &self.chat_base_url {
            Some(url) => url.clone(),
            None => derive_chat_base(&self.api_base_url),
        }
    }

    /// Defaults overridden by `GLITCH_API_URL`, `GLITCH_CHAT_URL` and
    /// `GLITCH_CHAT_LOG_CAPACITY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_api_base_url(url.trim());
            }
        }
        if let Ok(url) = std::env::var(ENV_CHAT_URL) {
            if !url.trim().is_empty() {
                config = config.with_chat_base_url(url.trim());
            }
        }
        if let Ok(raw) = std::env::var(ENV_CHAT_LOG_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => config = config.with_chat_log_capacity(capacity),
                Err(_) => warn!("Ignoring invalid {}={:?}", ENV_CHAT_LOG_CAPACITY, raw),
            }
        }

        config
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn derive_chat_base(api_base: &str) -> String {
    if let Some(rest) = api_base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_base.to_string()
    }
}
