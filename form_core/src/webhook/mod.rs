//! Outbound delivery of submissions to the workflow webhook

pub mod client;
pub mod mock;
pub mod transport;

pub use client::{WebhookClient, WebhookEndpoint, WebhookError, WebhookResponse};
pub use mock::{MockCall, MockTransport};
pub use transport::{HttpResponse, ReqwestTransport, TransportError, WebhookTransport};
