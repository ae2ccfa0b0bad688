use std::collections::HashMap;

use futures::future::join_all;
use tracing::warn;

use super::observable::{ErrorSlot, LoadingFlag, Slice};
use crate::error::DescribeFailure;
use crate::models::{Follow, User};
use crate::repository::Repository;

/// Followed channels that are live right now, with their owners' profiles.
pub struct LiveView {
    repo: Repository,
    follows: Slice<Vec<Follow>>,
    users: Slice<HashMap<String, User>>,
    loading: LoadingFlag,
    errors: ErrorSlot,
}

impl LiveView {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            follows: Slice::new(Vec::new()),
            users: Slice::new(HashMap::new()),
            loading: LoadingFlag::new(),
            errors: ErrorSlot::new(),
        }
    }

    /// Fetch live follows, then resolve each channel owner's profile.
    ///
    /// A profile that fails to load is left out of the map; the others
    /// still land.
    pub async fn load(&self) {
        let follows_ticket = self.follows.begin();
        let users_ticket = self.users.begin();
        let _loading = self.loading.start();

        let follows = match self.repo.live_follows().await {
            Ok(follows) => follows,
            Err(e) => {
                if !self.follows.is_stale(follows_ticket) {
                    self.errors.set(e.describe("Failed to load live streams"));
                }
                return;
            }
        };

        let mut usernames: Vec<String> = follows
            .iter()
            .filter_map(|f| f.target_username().map(str::to_string))
            .collect();
        usernames.sort();
        usernames.dedup();
        if !self.follows.commit(follows_ticket, follows) {
            return;
        }

        let lookups = usernames.into_iter().map(|username| async move {
            let result = self.repo.user_by_name(&username).await;
            (username, result)
        });

        let mut users = HashMap::new();
        for (username, result) in join_all(lookups).await {
            match result {
                Ok(user) => {
                    users.insert(username, user);
                }
                Err(e) => {
                    warn!(%username, "Profile lookup failed: {}", e);
                    self.errors.set(e.describe("Failed to load user"));
                }
            }
        }
        self.users.commit(users_ticket, users);
    }

    pub fn follows(&self) -> Vec<Follow> {
        self.follows.get()
    }

    pub fn users(&self) -> HashMap<String, User> {
        self.users.get()
    }

    pub fn user_for(&self, username: &str) -> Option<User> {
        self.users.get().get(username).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.errors.get()
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }
}
