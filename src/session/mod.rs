//! The signed-in session and its observable context.
//!
//! [`SessionContext`] is created once at startup and cloned into every
//! component that needs the bearer token. Writes go to the in-memory value
//! first and are then persisted through the [`SessionStore`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::AuthResponse;
use crate::traits::{SessionStore, SessionStoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Session {
    /// A session holding a non-empty token.
    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn signed_in(auth: &AuthResponse, dark_mode: bool) -> Self {
        Self {
            token: Some(auth.token.clone()),
            user_id: Some(auth.id),
            username: Some(auth.username.clone()),
            dark_mode,
        }
    }

    /// Same preferences, no credentials.
    fn signed_out(&self) -> Self {
        Self {
            token: None,
            user_id: None,
            username: None,
            dark_mode: self.dark_mode,
        }
    }

    fn is_empty(&self) -> bool {
        *self == Session::default()
    }
}

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    tx: Arc<watch::Sender<Session>>,
}

impl SessionContext {
    /// Context starting from whatever the store holds.
    ///
    /// An unreadable store is logged and treated as signed out.
    pub async fn load(store: Arc<dyn SessionStore>) -> Self {
        let initial = match store.load().await {
            Ok(Some(session)) => {
                debug!(user = ?session.username, "Loaded saved session");
                session
            }
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("Ignoring unreadable session: {}", e);
                Session::default()
            }
        };
        Self::with_session(store, initial)
    }

    /// Context with a known starting value; nothing is read from the store.
    pub fn with_session(store: Arc<dyn SessionStore>, session: Session) -> Self {
        let (tx, _rx) = watch::channel(session);
        Self {
            store,
            tx: Arc::new(tx),
        }
    }

    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        let session = self.tx.borrow();
        session.token.clone().filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.tx.borrow().user_id
    }

    pub fn username(&self) -> Option<String> {
        self.tx.borrow().username.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_signed_in()
    }

    pub fn dark_mode(&self) -> bool {
        self.tx.borrow().dark_mode
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Record a successful login or registration. Dark mode carries over.
    pub async fn sign_in(&self, auth: &AuthResponse) -> Result<(), SessionStoreError> {
        let session = Session::signed_in(auth, self.dark_mode());
        self.tx.send_replace(session.clone());
        info!(user = %auth.username, "Signed in");
        self.store.save(&session).await
    }

    /// Forget the credentials, keeping the dark mode preference.
    pub async fn sign_out(&self) -> Result<(), SessionStoreError> {
        let session = self.current().signed_out();
        self.tx.send_replace(session.clone());
        info!("Signed out");
        if session.is_empty() {
            self.store.clear().await
        } else {
            self.store.save(&session).await
        }
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<(), SessionStoreError> {
        let changed = self.tx.send_if_modified(|s| {
            if s.dark_mode == enabled {
                false
            } else {
                s.dark_mode = enabled;
                true
            }
        });
        if changed {
            self.store.save(&self.current()).await?;
        }
        Ok(())
    }

    /// Flip dark mode and return the new value.
    pub async fn toggle_dark_mode(&self) -> Result<bool, SessionStoreError> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.tx.borrow();
        f.debug_struct("SessionContext")
            .field("username", &session.username)
            .field("signed_in", &session.is_signed_in())
            .finish()
    }
}
