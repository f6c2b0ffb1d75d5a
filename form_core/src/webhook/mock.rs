//! Scripted transport for tests.

use super::transport::{HttpResponse, TransportError, WebhookTransport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Mock transport returning predetermined results.
///
/// Results are keyed by `"{METHOD} {url}"` and consumed in FIFO order. A call
/// with nothing scripted fails with a network error, which is also how a
/// test simulates an unreachable endpoint.
///
/// ```ignore
/// let mock = MockTransport::new();
/// mock.add_response("POST /webhook/content", Err(MockTransport::network_error("/webhook/content")));
/// mock.add_response("POST https://forms.example.com/webhook/content", Ok(HttpResponse::new(200, "{}")));
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<HttpResponse, TransportError>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, key: &str, response: Result<HttpResponse, TransportError>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn network_error(url: &str) -> TransportError {
        TransportError::Network {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn respond(&self, method: &str, url: &str, body: Option<String>) -> Result<HttpResponse, TransportError> {
        self.calls.lock().push(MockCall {
            method: method.to_string(),
            url: url.to_string(),
            body,
        });

        let key = format!("{} {}", method, url);
        self.responses
            .lock()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    url: url.to_string(),
                    reason: format!("no mock response configured for {}", key),
                })
            })
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        self.respond("POST", url, Some(body))
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.respond("GET", url, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_are_consumed_in_order() {
        let mock = MockTransport::new();
        mock.add_response("GET http://hook", Ok(HttpResponse::new(404, "")));
        mock.add_response("GET http://hook", Ok(HttpResponse::new(200, "")));

        assert_eq!(mock.get("http://hook").await.unwrap().status, 404);
        assert_eq!(mock.get("http://hook").await.unwrap().status, 200);
        assert!(mock.get("http://hook").await.is_err());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_post_bodies() {
        let mock = MockTransport::new();
        mock.add_response("POST http://hook", Ok(HttpResponse::new(200, "{}")));

        mock.post_json("http://hook", "{\"a\":1}".to_string()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].body.as_deref(), Some("{\"a\":1}"));
    }
}
