//! Mock configuration helpers.
//!
//! Re-exports the mock adapters from `glitch::adapters::mock` and adds a
//! route builder keyed by API path instead of full URL.

#![allow(dead_code)]

use std::time::Duration;

pub use glitch::adapters::mock::{
    InMemorySessionStore, MockChatConnector, MockHttpClient, MockResponse, RecordedRequest,
};

use super::BASE_URL;

/// Routes for a [`MockHttpClient`], written as `("GET", "/api/streams")`.
#[derive(Clone, Default)]
pub struct MockApi {
    client: MockHttpClient,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    pub fn on(&self, method: &str, path: &str, response: MockResponse) -> &Self {
        self.client.set_response(method, &Self::url(path), response);
        self
    }

    pub fn on_json(&self, method: &str, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.on(method, path, MockResponse::json(status, body))
    }

    /// One-shot response served after `delay`, ahead of any fixed route.
    pub fn once_after(
        &self,
        method: &str,
        path: &str,
        delay: Duration,
        response: MockResponse,
    ) -> &Self {
        self.client
            .enqueue_response(method, &Self::url(path), response, delay);
        self
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.client.requests_to(method, &Self::url(path))
    }

    pub fn client(&self) -> MockHttpClient {
        self.client.clone()
    }
}
