//! The single choke point for all backend calls.
//!
//! Every feature API module routes through [`ApiClient`]: it resolves
//! server-relative paths against the configured base URL, injects the bearer
//! token read from the injected session store, decodes the backend's JSON
//! success and error envelopes, and fires the auth-failure bus on 401s.
//! Calls are single-attempt; nothing here retries, queues, or coalesces.

use crate::config::Config;
use crate::errors::{ApiError, ApiResult};
use crate::session::{AuthEventBus, SessionStore};
use anyhow::Context;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Skip bearer-token injection (login, register, public endpoints).
    /// A 401 on a skip-auth request does not fire the auth-failure bus.
    pub skip_auth: bool,
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Extra headers set after the defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn skip_auth() -> Self {
        Self {
            skip_auth: true,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Typed HTTP client over the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    config: Config,
    session: Arc<SessionStore>,
    events: Arc<AuthEventBus>,
}

impl ApiClient {
    /// Creates a client for the configured base URL. The session store is
    /// injected so the client itself never touches durable storage.
    pub fn new(
        config: Config,
        session: Arc<SessionStore>,
        events: Arc<AuthEventBus>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid API base URL '{}'", config.api_base_url))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            config,
            session,
            events,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request::<T, ()>(Method::GET, path, None, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request::<T, ()>(Method::DELETE, path, None, options)
            .await
    }

    /// DELETE carrying a JSON body (account deletion confirms with a
    /// password).
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::DELETE, path, Some(body), options)
            .await
    }

    /// DELETE where the backend answers 204 No Content.
    pub async fn delete_unit(&self, path: &str, options: RequestOptions) -> ApiResult<()> {
        self.delete::<()>(path, options).await
    }

    /// Multipart POST for uploads. Content type is set by the form; the
    /// bearer header is injected as usual.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = self.build_url(path, &options.query)?;
        debug!("POST {} (multipart)", url);

        let mut request = self.http.post(url);
        if let Some(value) = self.auth_header_value(options.skip_auth) {
            request = request.header(AUTHORIZATION, value);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.multipart(form).send().await?;
        self.handle_response(response, options.skip_auth).await
    }

    /// Single generic request: builds the URL, attaches headers and an
    /// optional JSON body, sends once, and decodes the outcome.
    pub async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = self.build_url(path, &options.query)?;
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(value) = self.auth_header_value(options.skip_auth) {
            request = request.header(AUTHORIZATION, value);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response, options.skip_auth).await
    }

    /// Resolves a server-relative path against the base URL and appends
    /// query pairs.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> ApiResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::validation(format!("Invalid request path '{}': {}", path, e)))?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// The `Authorization` header value, absent when no token is stored or
    /// auth was skipped.
    pub fn auth_header_value(&self, skip_auth: bool) -> Option<String> {
        if skip_auth {
            return None;
        }
        self.session.token().map(|token| format!("Bearer {}", token))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        skip_auth: bool,
    ) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            decode_success(&body)
        } else {
            warn!("Request failed with status {}", status);
            Err(self.http_error(status.as_u16(), &body, skip_auth))
        }
    }

    /// Decodes a non-2xx body into a typed error, firing the auth-failure
    /// bus on 401 unless auth was skipped for this request.
    pub(crate) fn http_error(&self, status: u16, body: &str, skip_auth: bool) -> ApiError {
        if status == 401 && !skip_auth {
            warn!("Received 401, notifying auth-failure observers");
            self.events.notify();
        }
        decode_error_body(status, body)
    }
}

/// Backend error envelope: `{error, message, details?}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
    details: Option<BTreeMap<String, String>>,
}

/// Decodes a 2xx body. Empty and non-JSON bodies read as JSON `null`, so
/// unit and optional targets tolerate 204 responses; a JSON body that does
/// not fit `T` is a decode error.
pub(crate) fn decode_success<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let effective = if body.trim().is_empty() { "null" } else { body };
    match serde_json::from_str(effective) {
        Ok(value) => Ok(value),
        Err(first) => serde_json::from_str("null")
            .map_err(|_| ApiError::Decode(format!("Failed to decode response body: {}", first))),
    }
}

/// Decodes a non-2xx body into [`ApiError::Http`]. Falls back to a message
/// synthesized from the status code, so the message is never empty.
pub(crate) fn decode_error_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.is_some() || envelope.message.is_some() => ApiError::Http {
            error_code: envelope
                .error
                .unwrap_or_else(|| "HTTP_ERROR".to_string()),
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| default_status_message(status)),
            field_errors: envelope.details,
            status,
        },
        _ => ApiError::Http {
            status,
            error_code: "HTTP_ERROR".to_string(),
            message: default_status_message(status),
            field_errors: None,
        },
    }
}

fn default_status_message(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed");
    format!("HTTP {}: {}", status, reason)
}
