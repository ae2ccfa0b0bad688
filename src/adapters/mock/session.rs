//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::session::Session;
use crate::traits::{SessionStore, SessionStoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
    load_should_fail: Arc<Mutex<bool>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        *store.session.lock().unwrap() = Some(session);
        store
    }

    /// What is currently stored.
    pub fn get(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub fn fail_loads(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    pub fn fail_saves(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(SessionStoreError::Serialization(
                "mock load failure".to_string(),
            ));
        }
        Ok(self.get())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SessionStoreError::Io("mock save failure".to_string()));
        }
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = InMemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        let session = Session {
            token: Some("t".to_string()),
            ..Session::default()
        };
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn test_failure_toggles() {
        let store = InMemorySessionStore::new();
        store.fail_saves(true);
        assert!(store.save(&Session::default()).await.is_err());
        store.fail_loads(true);
        assert!(store.load().await.is_err());
    }
}
