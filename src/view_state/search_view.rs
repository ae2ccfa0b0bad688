use tracing::{debug, warn};

use super::observable::{ErrorSlot, LoadingFlag, Slice};
use crate::error::DescribeFailure;
use crate::models::{Stream, User};
use crate::repository::Repository;

/// Discovery screen: everything live, plus user search.
pub struct SearchView {
    repo: Repository,
    streams: Slice<Vec<Stream>>,
    query: Slice<String>,
    results: Slice<Vec<User>>,
    loading: LoadingFlag,
    errors: ErrorSlot,
}

impl SearchView {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            streams: Slice::new(Vec::new()),
            query: Slice::new(String::new()),
            results: Slice::new(Vec::new()),
            loading: LoadingFlag::new(),
            errors: ErrorSlot::new(),
        }
    }

    pub async fn load_live_streams(&self) {
        let ticket = self.streams.begin();
        let _loading = self.loading.start();
        match self.repo.live_streams().await {
            Ok(streams) => {
                self.streams.commit(ticket, streams);
            }
            Err(e) => {
                warn!("Live streams fetch failed: {}", e);
                if !self.streams.is_stale(ticket) {
                    self.errors.set(e.describe("Failed to load live streams"));
                }
            }
        }
    }

    /// Search users by name. A blank query clears the results and
    /// refreshes the live list instead; a failed search shows no results.
    pub async fn search(&self, query: &str) {
        self.query.set(query.to_string());

        if query.trim().is_empty() {
            self.results.set(Vec::new());
            self.load_live_streams().await;
            return;
        }

        let ticket = self.results.begin();
        let _loading = self.loading.start();
        match self.repo.search_users(query.trim()).await {
            Ok(users) => {
                debug!(query, hits = users.len(), "Search finished");
                self.results.commit(ticket, users);
            }
            Err(e) => {
                warn!(query, "Search failed: {}", e);
                self.results.commit(ticket, Vec::new());
            }
        }
    }

    pub fn streams(&self) -> Vec<Stream> {
        self.streams.get()
    }

    pub fn query(&self) -> String {
        self.query.get()
    }

    pub fn results(&self) -> Vec<User> {
        self.results.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.errors.get()
    }
}
