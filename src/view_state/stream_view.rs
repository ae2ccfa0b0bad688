//! State of the stream screen.
//!
//! Stream metadata, the streamer's profile with the follow flag, and the
//! chat are fetched independently and land in their own slices. Failures
//! only ever touch the shared error slot, so data already on screen stays.

use std::sync::Arc;

use tracing::{debug, warn};

use super::follow;
use super::observable::{ErrorSlot, LoadingFlag, Slice, Ticket};
use crate::chat::{ChatSession, ChatStatus};
use crate::config::ClientConfig;
use crate::error::DescribeFailure;
use crate::models::{ChatMessage, Stream, User};
use crate::repository::Repository;
use crate::traits::ChatConnector;
use crate::websocket::USER_LEFT;

pub struct StreamView {
    repo: Repository,
    chat: ChatSession,
    stream: Slice<Option<Stream>>,
    user: Slice<Option<User>>,
    following: Slice<bool>,
    own_stream: Slice<bool>,
    loading: LoadingFlag,
    errors: ErrorSlot,
}

impl StreamView {
    pub fn new(repo: Repository, connector: Arc<dyn ChatConnector>, config: &ClientConfig) -> Self {
        let errors = ErrorSlot::new();
        let chat = ChatSession::new(
            connector,
            repo.session().clone(),
            config.chat_base_url(),
            config.chat_log_capacity,
            errors.clone(),
        );
        Self {
            repo,
            chat,
            stream: Slice::new(None),
            user: Slice::new(None),
            following: Slice::new(false),
            own_stream: Slice::new(false),
            loading: LoadingFlag::new(),
            errors,
        }
    }

    /// Load everything the screen shows for `username` and join its chat.
    pub async fn enter(&self, username: &str) {
        debug!(username, "Entering stream screen");
        tokio::join!(
            self.load_stream(username),
            self.load_user(username),
            self.chat.open(username),
            self.check_own_stream(username),
        );
    }

    pub async fn load_stream(&self, username: &str) {
        let ticket = self.stream.begin();
        let _loading = self.loading.start();
        match self.repo.stream_by_name(username).await {
            Ok(stream) => {
                self.stream.commit(ticket, Some(stream));
            }
            Err(e) => {
                warn!(username, "Stream fetch failed: {}", e);
                self.report(&self.stream, ticket, e.describe("Failed to load stream"));
            }
        }
    }

    /// Load the streamer's profile, then whether we follow them.
    pub async fn load_user(&self, username: &str) {
        let ticket = self.user.begin();
        match self.repo.user_by_name(username).await {
            Ok(user) => {
                let user_id = user.id;
                if self.user.commit(ticket, Some(user)) {
                    follow::refresh(&self.repo, &self.following, user_id).await;
                }
            }
            Err(e) => {
                warn!(username, "User fetch failed: {}", e);
                self.report(&self.user, ticket, e.describe("Failed to load user"));
            }
        }
    }

    async fn check_own_stream(&self, username: &str) {
        let own = self.repo.session().username().as_deref() == Some(username);
        self.own_stream.set(own);
    }

    /// Follow or unfollow the streamer.
    ///
    /// The flag flips immediately and is restored if the server refuses.
    /// On success the profile is fetched again for the new follower count.
    /// Nothing lands once the screen was left.
    pub async fn toggle_follow(&self) {
        let Some(user) = self.user.get() else {
            debug!("No streamer loaded, ignoring follow toggle");
            return;
        };

        match follow::toggle(&self.repo, &self.following, user.id).await {
            Some(Ok(_)) => self.refresh_user(&user.username).await,
            Some(Err(e)) => self.errors.set(e.describe("Error toggling follow")),
            None => {}
        }
    }

    async fn refresh_user(&self, username: &str) {
        let ticket = self.user.begin();
        match self.repo.user_by_name(username).await {
            Ok(user) => {
                self.user.commit(ticket, Some(user));
            }
            Err(e) => self.report(&self.user, ticket, e.describe("Failed to load user")),
        }
    }

    /// Change the stream title. The screen shows whatever the server returns.
    pub async fn update_title(&self, title: &str) {
        let ticket = self.stream.begin();
        let _loading = self.loading.start();
        match self.repo.update_stream_title(title).await {
            Ok(stream) => {
                self.stream.commit(ticket, Some(stream));
            }
            Err(e) => {
                warn!("Title update failed: {}", e);
                self.report(&self.stream, ticket, e.describe("Failed to update stream title"));
            }
        }
    }

    pub async fn send_chat(&self, text: &str) {
        self.chat.send(text).await;
    }

    /// Drop every pending result and close the chat.
    pub fn leave(&self) {
        self.stream.invalidate();
        self.user.invalidate();
        self.following.invalidate();
        self.own_stream.invalidate();
        self.chat.close(USER_LEFT);
    }

    pub fn clear_error(&self) {
        self.errors.clear();
    }

    fn report<T: Clone>(&self, slice: &Slice<T>, ticket: Ticket, message: String) {
        if slice.is_stale(ticket) {
            debug!("Discarding stale failure: {}", message);
            return;
        }
        self.errors.set(message);
    }

    pub fn stream(&self) -> Option<Stream> {
        self.stream.get()
    }

    /// Viewer count as reported by the last stream fetch.
    pub fn viewers(&self) -> Option<i64> {
        self.stream.get().map(|s| s.viewers)
    }

    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn is_following(&self) -> bool {
        self.following.get()
    }

    pub fn is_own_stream(&self) -> bool {
        self.own_stream.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.errors.get()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.chat.messages()
    }

    pub fn chat_status(&self) -> ChatStatus {
        self.chat.status()
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn stream_slice(&self) -> &Slice<Option<Stream>> {
        &self.stream
    }

    pub fn following_slice(&self) -> &Slice<bool> {
        &self.following
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySessionStore, MockChatConnector, MockHttpClient};
    use crate::api::GlitchApi;
    use crate::session::{Session, SessionContext};

    fn view(username: &str) -> StreamView {
        let session = SessionContext::with_session(
            Arc::new(InMemorySessionStore::new()),
            Session {
                token: Some("tok".to_string()),
                user_id: Some(1),
                username: Some(username.to_string()),
                dark_mode: false,
            },
        );
        let api = GlitchApi::new("http://glitch.test", Arc::new(MockHttpClient::new()));
        StreamView::new(
            Repository::new(api, session),
            Arc::new(MockChatConnector::new()),
            &ClientConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_own_stream_detection() {
        let view = view("alice");
        view.check_own_stream("alice").await;
        assert!(view.is_own_stream());
        view.check_own_stream("bob").await;
        assert!(!view.is_own_stream());
    }

    #[tokio::test]
    async fn test_toggle_without_user_is_ignored() {
        let view = view("alice");
        view.toggle_follow().await;
        assert!(!view.is_following());
        assert!(view.error().is_none());
    }

    #[test]
    fn test_stale_failure_not_reported() {
        let view = view("alice");
        let ticket = view.stream.begin();
        view.stream.invalidate();
        view.report(&view.stream, ticket, "Failed to load stream: boom".to_string());
        assert!(view.error().is_none());
    }
}
