//! Webhook client with a one-shot absolute-URL fallback.
//!
//! ```text
//! post(payload)
//!   ├─ POST endpoint.url()            ──ok──▶ interpret status
//!   └─ transport error
//!        └─ POST endpoint.absolute_url() (once) ──ok──▶ interpret status
//!                                        └─ error ──▶ WebhookError::Transport
//! ```
//!
//! HTTP-level failures are never retried.

use super::transport::{HttpResponse, TransportError, WebhookTransport};
use crate::form::SubmissionPayload;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where submissions go.
///
/// `url` is either absolute or a same-origin path. `origin`, when set, is the
/// base the path is resolved against for the fallback attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    url: String,
    origin: Option<Url>,
}

impl WebhookEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn origin(&self) -> Option<&Url> {
        self.origin.as_ref()
    }

    /// Origin joined with the endpoint, or the endpoint itself when it is
    /// already absolute and no origin is configured.
    pub fn absolute_url(&self) -> Option<String> {
        let resolved = match &self.origin {
            Some(origin) => origin.join(&self.url).ok(),
            None => Url::parse(&self.url).ok(),
        };
        resolved.map(String::from)
    }
}

/// Successful webhook answer: 2xx with a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    pub status: u16,
    pub url: String,
    pub body: serde_json::Value,
}

enum Outbound {
    Post(String),
    Get,
}

#[derive(Clone)]
pub struct WebhookClient<T> {
    transport: T,
    endpoint: WebhookEndpoint,
}

impl<T: WebhookTransport> WebhookClient<T> {
    pub fn new(transport: T, endpoint: WebhookEndpoint) -> Self {
        Self { transport, endpoint }
    }

    pub fn endpoint(&self) -> &WebhookEndpoint {
        &self.endpoint
    }

    pub async fn post(&self, payload: &SubmissionPayload) -> Result<WebhookResponse, WebhookError> {
        let body = serde_json::to_string(payload)?;
        debug!(endpoint = %self.endpoint.url(), payload = %body, "submitting payload to webhook");

        let (response, url) = self.send_with_fallback(Outbound::Post(body)).await?;

        if !response.is_success() {
            warn!(url = %url, status = response.status, "webhook rejected submission");
            return Err(WebhookError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let body = serde_json::from_str(&response.body)
            .map_err(|e| WebhookError::InvalidBody(e.to_string()))?;

        info!(url = %url, status = response.status, "webhook accepted submission");
        Ok(WebhookResponse {
            status: response.status,
            url,
            body,
        })
    }

    /// GET against the endpoint; any HTTP answer means the endpoint is reachable.
    pub async fn check_reachable(&self) -> Result<u16, TransportError> {
        let (response, url) = self.send_with_fallback(Outbound::Get).await?;
        debug!(url = %url, status = response.status, "webhook reachability check answered");
        Ok(response.status)
    }

    async fn dispatch(&self, request: &Outbound, url: &str) -> Result<HttpResponse, TransportError> {
        match request {
            Outbound::Post(body) => self.transport.post_json(url, body.clone()).await,
            Outbound::Get => self.transport.get(url).await,
        }
    }

    async fn send_with_fallback(&self, request: Outbound) -> Result<(HttpResponse, String), TransportError> {
        let primary = self.endpoint.url();
        let first_error = match self.dispatch(&request, primary).await {
            Ok(response) => return Ok((response, primary.to_string())),
            Err(e) => e,
        };

        let Some(fallback) = self.endpoint.absolute_url() else {
            warn!(url = %primary, error = %first_error, "webhook unreachable and no absolute URL to fall back to");
            return Err(first_error);
        };

        warn!(
            url = %primary,
            fallback = %fallback,
            error = %first_error,
            "webhook request failed, retrying once against absolute URL"
        );

        let response = self.dispatch(&request, &fallback).await?;
        Ok((response, fallback))
    }
}
