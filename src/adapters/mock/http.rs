//! Mock HTTP client for testing.
//!
//! Responses are keyed by method and URL. A URL without an exact entry
//! falls back to the longest registered prefix, then to the default.
//! Queued responses are consumed first, in order, which lets a test make
//! the first of two identical requests finish last.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{FilePart, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// JSON body for POST, `None` otherwise.
    pub body: Option<String>,
    /// File part for multipart uploads.
    pub file: Option<FilePart>,
}

impl RecordedRequest {
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

impl MockResponse {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }

    pub fn text(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }

    pub fn empty(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

#[derive(Debug, Clone)]
struct Staged {
    response: MockResponse,
    delay: Duration,
}

#[derive(Debug, Clone)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Staged>>>,
    queued: Arc<Mutex<HashMap<String, VecDeque<Staged>>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn key(method: &str, url: &str) -> String {
    format!("{} {}", method, url)
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            queued: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_response(&self, method: &str, url: &str, response: MockResponse) {
        self.set_delayed_response(method, url, response, Duration::ZERO);
    }

    /// Like [`set_response`](Self::set_response), answered after `delay`.
    pub fn set_delayed_response(
        &self,
        method: &str,
        url: &str,
        response: MockResponse,
        delay: Duration,
    ) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key(method, url), Staged { response, delay });
    }

    /// One-shot response consumed before any standing response.
    pub fn enqueue_response(&self, method: &str, url: &str, response: MockResponse, delay: Duration) {
        let mut queued = self.queued.lock().unwrap();
        queued
            .entry(key(method, url))
            .or_default()
            .push_back(Staged { response, delay });
    }

    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method and URL.
    pub fn requests_to(&self, method: &str, url: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method && r.url == url)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        file: Option<FilePart>,
    ) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            file,
        });
    }

    fn lookup(&self, method: &str, url: &str) -> Option<Staged> {
        let wanted = key(method, url);

        if let Some(queue) = self.queued.lock().unwrap().get_mut(&wanted) {
            if let Some(staged) = queue.pop_front() {
                return Some(staged);
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some(staged) = responses.get(&wanted) {
            return Some(staged.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| wanted.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, staged)| staged.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        self.default_response
            .lock()
            .unwrap()
            .clone()
            .map(|response| Staged {
                response,
                delay: Duration::ZERO,
            })
    }

    async fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        let Some(staged) = self.lookup(method, url) else {
            return Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            )));
        };

        if !staged.delay.is_zero() {
            tokio::time::sleep(staged.delay).await;
        }

        match staged.response {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.respond("GET", url).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.respond("POST", url).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None, None);
        self.respond("DELETE", url).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        part: FilePart,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, None, Some(part));
        self.respond("POST", url).await
    }
}
