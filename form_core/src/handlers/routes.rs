//! Route table of the form host

use super::{api, health, page};
use crate::error::AppError;
use crate::webhook::WebhookTransport;
use crate::AppState;
use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tracing::info;

pub fn create_routes<T: WebhookTransport>() -> Router<AppState<T>> {
    Router::new()
        .route("/", get(page::handle_form_page::<T>).post(page::handle_form_action::<T>))
        .route("/health", get(health::handle_health::<T>))
        .route("/api/validate", post(api::handle_validate::<T>))
        .route("/api/preview", post(api::handle_preview::<T>))
        .route("/api/submit", post(api::handle_submit::<T>))
        .route("/api/connection-test", get(api::handle_connection_test::<T>))
        .fallback(handle_not_found)
}

async fn handle_not_found(uri: Uri) -> AppError {
    info!("{} - No such route", uri.path());
    AppError::NotFound(format!("No route for {}", uri.path()))
}
