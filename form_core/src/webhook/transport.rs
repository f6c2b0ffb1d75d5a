//! HTTP transport abstraction for webhook calls.
//!
//! `WebhookTransport` separates "send bytes to a URL" from the fallback and
//! status interpretation in [`super::client`], so the client can be driven by
//! [`super::mock::MockTransport`] in tests and by reqwest in production.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Response from a single HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
            .to_string();

        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
}

#[async_trait]
pub trait WebhookTransport: Send + Sync + Clone + 'static {
    /// POST `body` with JSON content-type and accept headers.
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError>;

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Production transport.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder, url: &str) -> Result<HttpResponse, TransportError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "webhook request failed");
            TransportError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            response_len = body.len(),
            "webhook response received"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

fn parse_url(url: &str) -> Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let target = parse_url(url)?;
        let request = self
            .client
            .post(target)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body);

        self.execute(request, url).await
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let target = parse_url(url)?;
        self.execute(self.client.get(target), url).await
    }
}
