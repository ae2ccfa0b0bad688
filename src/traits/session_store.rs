//! Persistence of the signed-in session.

use async_trait::async_trait;

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    Io(String),
    Serialization(String),
    /// No location to store the session in (e.g. no home directory).
    Unavailable(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::Io(msg) => write!(f, "IO error: {}", msg),
            SessionStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            SessionStoreError::Unavailable(msg) => write!(f, "Session store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Where the session survives between runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` when nothing is stored.
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            SessionStoreError::Io("denied".to_string()).to_string(),
            "IO error: denied"
        );
        assert_eq!(
            SessionStoreError::Unavailable("no home".to_string()).to_string(),
            "Session store unavailable: no home"
        );
    }
}
