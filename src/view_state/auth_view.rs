use tracing::{info, warn};

use super::observable::Slice;
use crate::error::{GlitchError, GlitchResult};
use crate::models::AuthResponse;
use crate::repository::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}

/// Login and registration screen.
pub struct AuthView {
    repo: Repository,
    state: Slice<AuthState>,
}

impl AuthView {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            state: Slice::new(AuthState::Idle),
        }
    }

    pub async fn login(&self, username: &str, password: &str) {
        let ticket = self.state.begin();
        self.state.publish(AuthState::Loading);
        let result = self.repo.login(username, password).await;
        self.state.commit(ticket, self.finish(result).await);
    }

    pub async fn register(&self, username: &str, password: &str, email: &str) {
        let ticket = self.state.begin();
        self.state.publish(AuthState::Loading);
        let result = self.repo.register(username, password, email).await;
        self.state.commit(ticket, self.finish(result).await);
    }

    async fn finish(&self, result: GlitchResult<AuthResponse>) -> AuthState {
        let auth = match result {
            Ok(auth) => auth,
            Err(e) => {
                warn!("Authentication failed: {}", e);
                return AuthState::Error(e.user_message());
            }
        };
        match self.repo.session().sign_in(&auth).await {
            Ok(()) => {
                info!(username = %auth.username, "Signed in");
                AuthState::Success
            }
            Err(e) => AuthState::Error(GlitchError::from(e).user_message()),
        }
    }

    pub async fn logout(&self) {
        if let Err(e) = self.repo.session().sign_out().await {
            warn!("Failed to clear session: {}", e);
        }
        self.reset();
    }

    pub fn reset(&self) {
        self.state.set(AuthState::Idle);
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
