//! Common test utilities for integration tests.
//!
//! ```ignore
//! let harness = TestHarness::signed_in("viewer").await;
//! harness.api.on_json("GET", "/api/streams/alice", 200, stream_json("alice", 42));
//! let view = harness.app.stream_view();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use glitch::app::App;
use glitch::config::ClientConfig;
use glitch::session::Session;
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://glitch.test";
pub const CHAT_BASE_URL: &str = "ws://glitch.test";
pub const TOKEN: &str = "test-token-12345";

pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url(BASE_URL)
        .with_chat_log_capacity(50)
}

pub fn signed_in_session(username: &str, user_id: i64) -> Session {
    Session {
        token: Some(TOKEN.to_string()),
        user_id: Some(user_id),
        username: Some(username.to_string()),
        dark_mode: false,
    }
}

/// An [`App`] wired to mock adapters, with handles to each mock.
pub struct TestHarness {
    pub app: App,
    pub api: MockApi,
    pub chat: MockChatConnector,
    pub store: InMemorySessionStore,
}

impl TestHarness {
    pub async fn with_store(store: InMemorySessionStore) -> Self {
        let api = MockApi::new();
        let chat = MockChatConnector::new();
        let app = App::from_parts(
            test_config(),
            Arc::new(api.client()),
            Arc::new(store.clone()),
            Arc::new(chat.clone()),
        )
        .await;
        Self {
            app,
            api,
            chat,
            store,
        }
    }

    pub async fn signed_in(username: &str) -> Self {
        Self::with_store(InMemorySessionStore::with_session(signed_in_session(
            username, 1,
        )))
        .await
    }

    pub async fn signed_out() -> Self {
        Self::with_store(InMemorySessionStore::new()).await
    }
}

pub fn stream_json(username: &str, viewers: i64) -> Value {
    json!({
        "id": 1,
        "username": username,
        "live": true,
        "title": "Hi",
        "startedAt": "2024-05-01T18:00:00Z",
        "viewers": viewers,
    })
}

pub fn user_json(id: i64, username: &str, followers: i64) -> Value {
    json!({
        "id": id,
        "username": username,
        "createdAt": "2024-01-01T00:00:00Z",
        "bio": null,
        "profilePic": null,
        "followersCount": followers,
    })
}

pub fn follow_json(from: i64, to: i64) -> Value {
    json!({
        "id": 100 + to,
        "from": from,
        "to": to,
        "followedAt": "2024-03-01T12:00:00Z",
    })
}

pub fn chat_frame(username: &str, message: &str) -> String {
    json!({
        "username": username,
        "message": message,
        "at": "2024-05-01T18:05:00Z",
    })
    .to_string()
}

/// Poll `condition` until it holds or a second passes.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
