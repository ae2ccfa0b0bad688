use std::path::Path;

use tracing::{debug, warn};

use super::follow;
use super::observable::{ErrorSlot, LoadingFlag, Slice, Ticket};
use crate::error::DescribeFailure;
use crate::models::User;
use crate::repository::Repository;

/// State of a profile screen, either our own or someone else's.
pub struct ProfileView {
    repo: Repository,
    user: Slice<Option<User>>,
    following: Slice<bool>,
    loading: LoadingFlag,
    errors: ErrorSlot,
}

impl ProfileView {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            user: Slice::new(None),
            following: Slice::new(false),
            loading: LoadingFlag::new(),
            errors: ErrorSlot::new(),
        }
    }

    pub async fn load_current(&self) {
        let ticket = self.user.begin();
        let _loading = self.loading.start();
        match self.repo.current_user().await {
            Ok(user) => {
                self.user.commit(ticket, Some(user));
            }
            Err(e) => self.report(ticket, e.describe("Failed to load profile")),
        }
    }

    pub async fn load_by_username(&self, username: &str) {
        let ticket = self.user.begin();
        let _loading = self.loading.start();
        match self.repo.user_by_name(username).await {
            Ok(user) => {
                let user_id = user.id;
                if self.user.commit(ticket, Some(user)) && self.repo.session().is_signed_in() {
                    follow::refresh(&self.repo, &self.following, user_id).await;
                }
            }
            Err(e) => {
                warn!(username, "Profile fetch failed: {}", e);
                self.report(ticket, e.describe("Failed to load user"));
            }
        }
    }

    pub async fn toggle_follow(&self) {
        let Some(user) = self.user.get() else {
            return;
        };
        match follow::toggle(&self.repo, &self.following, user.id).await {
            Some(Ok(_)) => {
                let ticket = self.user.begin();
                match self.repo.user_by_name(&user.username).await {
                    Ok(fresh) => {
                        self.user.commit(ticket, Some(fresh));
                    }
                    Err(e) => self.report(ticket, e.describe("Failed to load user")),
                }
            }
            Some(Err(e)) => self.errors.set(e.describe("Error toggling follow")),
            None => {}
        }
    }

    pub async fn update_bio(&self, bio: &str) {
        let ticket = self.user.begin();
        match self.repo.update_bio(bio).await {
            Ok(user) => {
                self.user.commit(ticket, Some(user));
            }
            Err(e) => self.report(ticket, e.describe("Failed to update bio")),
        }
    }

    pub async fn upload_picture(&self, path: &Path) {
        let ticket = self.user.begin();
        let _loading = self.loading.start();
        match self.repo.upload_profile_picture(path).await {
            Ok(user) => {
                debug!(path = %path.display(), "Profile picture updated");
                self.user.commit(ticket, Some(user));
            }
            Err(e) => self.report(ticket, e.describe("Failed to upload picture")),
        }
    }

    /// Whether the loaded profile belongs to the signed-in user.
    pub fn is_own_profile(&self) -> bool {
        match (self.user.get(), self.repo.session().username()) {
            (Some(user), Some(me)) => user.username == me,
            _ => false,
        }
    }

    fn report(&self, ticket: Ticket, message: String) {
        if !self.user.is_stale(ticket) {
            self.errors.set(message);
        }
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }

    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn is_following(&self) -> bool {
        self.following.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.errors.get()
    }
}
