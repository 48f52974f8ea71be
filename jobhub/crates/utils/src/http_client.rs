//! Thin request-building layer over `reqwest`.
//!
//! An [`HttpClient`] owns a base URL and the headers that go out on every request
//! (`Accept`, and the bearer token when one is configured). Each request is assembled from
//! route fragments, opaque path parameters and query parameters. Path parameters are
//! percent-encoded as a single segment, so ids can be passed through untouched.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid value for header {name}")]
    InvalidHeader { name: String },

    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP client bound to a single API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpClientBuilder {
    /// Total timeout applied to every request sent by the built client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Attaches `Authorization: Bearer <token>` to every request.
    pub fn bearer_token(self, token: &str) -> Result<Self, HttpClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| HttpClientError::InvalidHeader { name: AUTHORIZATION.to_string() })?;
        value.set_sensitive(true);
        Ok(self.default_header(AUTHORIZATION, value))
    }

    pub fn build(self) -> Result<HttpClient, HttpClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(HttpClient { client, base_url: self.base_url, default_headers: self.default_headers })
    }
}

impl HttpClient {
    pub fn builder(base_url: &str) -> Result<HttpClientBuilder, HttpClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| HttpClientError::InvalidBaseUrl { url: base_url.to_string(), message: e.to_string() })?;
        if parsed.cannot_be_a_base() {
            return Err(HttpClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(HttpClientBuilder { base_url: parsed, timeout: None, default_headers })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(self)
    }
}

#[derive(Debug)]
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            method: Method::GET,
            segments: Vec::new(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends a static route such as `job/owner/list`, one segment per `/`.
    pub fn path(mut self, route: &str) -> Self {
        self.segments.extend(route.split('/').filter(|s| !s.is_empty()).map(str::to_string));
        self
    }

    /// Appends a single opaque segment. Any `/` inside it is encoded, not split.
    pub fn path_param(mut self, value: impl AsRef<str>) -> Self {
        self.segments.push(value.as_ref().to_string());
        self
    }

    pub fn query_param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HttpClientError> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn build_url(&self) -> Result<Url, HttpClientError> {
        let mut url = self.client.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| HttpClientError::InvalidBaseUrl {
                url: self.client.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?;
            segments.pop_if_empty();
            segments.extend(self.segments.iter());
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }

    pub async fn send(self) -> Result<Response, HttpClientError> {
        let url = self.build_url()?;
        debug!(method = %self.method, url = %url, "Sending request");

        let mut headers = self.client.default_headers.clone();
        headers.extend(self.headers);

        let mut request = self.client.client.request(self.method, url).headers(headers);
        if let Some(body) = self.body {
            request = request.body(body);
        }
        Ok(request.send().await?)
    }
}

/// Reads the body of a failed response for error reporting.
///
/// Falls back to the status' canonical reason when the body is empty or unreadable.
pub async fn extract_http_error_text(response: Response, operation: &str) -> (String, StatusCode) {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => (text, status),
        Ok(_) => (status.canonical_reason().unwrap_or("unknown error").to_string(), status),
        Err(e) => {
            trace!(operation = operation, error = %e, "Failed to read error response body");
            (format!("failed to read error body: {}", e), status)
        }
    }
}
