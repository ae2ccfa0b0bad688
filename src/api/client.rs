use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, GlitchError, GlitchResult, NetworkError};
use crate::traits::{FilePart, Headers, HttpClient, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Typed client for the Glitch REST API.
///
/// Stateless apart from the base URL: every call takes the bearer token it
/// should use. Non-2xx responses become [`ApiError`]s carrying the server's
/// message.
#[derive(Clone)]
pub struct GlitchApi {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl GlitchApi {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn headers(token: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Issue a request and return the raw response, whatever its status.
    pub(crate) async fn send_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> GlitchResult<Response> {
        let url = self.url(path);
        let headers = Self::headers(token);
        debug!(method = method.as_str(), %url, "API request");

        let result = match method {
            Method::Get => self.http.get(&url, &headers).await,
            Method::Post => {
                self.http
                    .post(&url, body.as_deref().unwrap_or("{}"), &headers)
                    .await
            }
            Method::Delete => self.http.delete(&url, &headers).await,
        };

        result.map_err(|e| {
            warn!(method = method.as_str(), %url, "Request failed: {}", e);
            GlitchError::Network(NetworkError::from_http(e, &url))
        })
    }

    /// Like [`send_raw`](Self::send_raw), with non-2xx turned into errors.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> GlitchResult<Response> {
        let response = self.send_raw(method, path, token, body).await?;
        Self::check_status(method, path, response)
    }

    fn check_status(method: Method, path: &str, response: Response) -> GlitchResult<Response> {
        if response.is_success() {
            return Ok(response);
        }
        let err = ApiError::from_response(response.status, &response.text_lossy());
        debug!(
            method = method.as_str(),
            path,
            status = err.status,
            "API error: {}",
            err.message
        );
        Err(GlitchError::Api(err))
    }

    fn encode<B: Serialize>(body: &B) -> GlitchResult<String> {
        serde_json::to_string(body).map_err(|e| GlitchError::decode("request body", e))
    }

    pub(crate) fn decode<T: DeserializeOwned>(response: &Response, target: &str) -> GlitchResult<T> {
        response.json().map_err(|e| GlitchError::decode(target, e))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        target: &str,
    ) -> GlitchResult<T> {
        let response = self.send(Method::Get, path, token, None).await?;
        Self::decode(&response, target)
    }

    pub(crate) async fn get_bytes(&self, path: &str, token: Option<&str>) -> GlitchResult<Bytes> {
        let response = self.send(Method::Get, path, token, None).await?;
        Ok(response.body)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
        target: &str,
    ) -> GlitchResult<T> {
        let response = self
            .send(Method::Post, path, token, Some(Self::encode(body)?))
            .await?;
        Self::decode(&response, target)
    }

    /// POST whose response body is ignored.
    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> GlitchResult<()> {
        self.send(Method::Post, path, token, Some(Self::encode(body)?))
            .await
            .map(|_| ())
    }

    pub(crate) async fn delete_unit(&self, path: &str, token: Option<&str>) -> GlitchResult<()> {
        self.send(Method::Delete, path, token, None).await.map(|_| ())
    }

    pub(crate) async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        part: FilePart,
        target: &str,
    ) -> GlitchResult<T> {
        let url = self.url(path);
        let headers = Self::headers(token);
        debug!(%url, file = %part.file_name, size = part.bytes.len(), "API upload");

        let response = self
            .http
            .post_multipart(&url, part, &headers)
            .await
            .map_err(|e| GlitchError::Network(NetworkError::from_http(e, &url)))?;
        let response = Self::check_status(Method::Post, path, response)?;
        Self::decode(&response, target)
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

impl std::fmt::Debug for GlitchApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlitchApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}
