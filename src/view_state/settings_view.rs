use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::observable::Slice;
use crate::error::{DescribeFailure, GlitchError};
use crate::repository::Repository;

/// Outcome of the last settings action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// Account settings: email, password, theme, VOD export, sign-out.
pub struct SettingsView {
    repo: Repository,
    email: Slice<Option<String>>,
    state: Slice<UpdateState>,
}

impl SettingsView {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            email: Slice::new(None),
            state: Slice::new(UpdateState::Idle),
        }
    }

    pub async fn load_auth_info(&self) {
        let ticket = self.email.begin();
        match self.repo.auth_info().await {
            Ok(info) => {
                self.email.commit(ticket, Some(info.email));
            }
            Err(e) => {
                warn!("Account info fetch failed: {}", e);
                self.state.set(UpdateState::Error(e.user_message()));
            }
        }
    }

    pub async fn toggle_dark_mode(&self) {
        if let Err(e) = self.repo.session().toggle_dark_mode().await {
            self.state
                .set(UpdateState::Error(GlitchError::from(e).user_message()));
        }
    }

    pub async fn update_email(&self, email: &str) {
        let ticket = self.state.begin();
        self.state.publish(UpdateState::Loading);
        let outcome = match self.repo.update_email(email).await {
            Ok(info) => {
                self.email.set(Some(info.email));
                UpdateState::Success("Email updated".to_string())
            }
            Err(e) => UpdateState::Error(e.user_message()),
        };
        self.state.commit(ticket, outcome);
    }

    pub async fn update_password(&self, old: &str, new: &str) {
        let ticket = self.state.begin();
        self.state.publish(UpdateState::Loading);
        let outcome = match self.repo.update_password(old, new).await {
            Ok(()) => UpdateState::Success("Password updated".to_string()),
            Err(e) => UpdateState::Error(e.user_message()),
        };
        self.state.commit(ticket, outcome);
    }

    /// Download the VOD CSV export into `dir`. Returns the written file.
    pub async fn export_vods(&self, dir: &Path) -> Option<PathBuf> {
        let ticket = self.state.begin();
        self.state.publish(UpdateState::Loading);
        match self.repo.export_vods_to(dir).await {
            Ok(path) => {
                self.state
                    .commit(ticket, UpdateState::Success("CSV downloaded".to_string()));
                Some(path)
            }
            Err(e) => {
                warn!("VOD export failed: {}", e);
                self.state.commit(
                    ticket,
                    UpdateState::Error(e.describe("Failed to download CSV")),
                );
                None
            }
        }
    }

    pub async fn logout(&self) {
        if let Err(e) = self.repo.session().sign_out().await {
            self.state
                .set(UpdateState::Error(GlitchError::from(e).user_message()));
            return;
        }
        self.email.set(None);
    }

    /// Delete the account on the server, then sign out locally.
    pub async fn delete_account(&self) {
        let ticket = self.state.begin();
        self.state.publish(UpdateState::Loading);
        if let Err(e) = self.repo.delete_account().await {
            self.state.commit(ticket, UpdateState::Error(e.user_message()));
            return;
        }
        info!("Account deleted");
        self.logout().await;
        self.state
            .commit(ticket, UpdateState::Success("Account deleted".to_string()));
    }

    pub fn reset(&self) {
        self.state.set(UpdateState::Idle);
    }

    pub fn email(&self) -> Option<String> {
        self.email.get()
    }

    pub fn username(&self) -> Option<String> {
        self.repo.session().username()
    }

    pub fn dark_mode(&self) -> bool {
        self.repo.session().dark_mode()
    }

    pub fn state(&self) -> UpdateState {
        self.state.get()
    }
}
