//! Application error types and handling

use crate::webhook::WebhookError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::JsonError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Webhook(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::IoError(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::NotFound(msg) => msg,
            AppError::Config(err) => {
                tracing::error!("Configuration error: {}", err);
                "Internal server error".to_string()
            }
            AppError::Webhook(err) => {
                tracing::warn!("Webhook error: {}", err);
                err.to_string()
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                "Internal server error".to_string()
            }
            AppError::JsonError(err) => {
                tracing::error!("JSON error: {:?}", err);
                "Invalid JSON data".to_string()
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_errors_map_to_bad_gateway() {
        let err = AppError::from(WebhookError::HttpStatus {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        });

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_request_keeps_message() {
        let err = AppError::BadRequest("unknown action".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown action");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
