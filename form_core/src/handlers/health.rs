//! Liveness check

use crate::{models::request::ApiResponse, webhook::WebhookTransport, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

pub async fn handle_health<T: WebhookTransport>(State(state): State<AppState<T>>) -> impl IntoResponse {
    debug!("GET /health");

    let endpoint = state.webhook.endpoint();
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "app": state.app_name,
        "version": state.version,
        "webhook": {
            "endpoint": endpoint.url(),
            "fallback": endpoint.absolute_url(),
        }
    })))
}
