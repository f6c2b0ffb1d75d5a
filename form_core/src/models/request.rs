//! Request and response models

use crate::form::SubmissionPayload;
use crate::ui::StatusBanner;
use crate::validation::ValidationResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of a submit attempt, whichever way it went.
#[derive(Debug, Serialize)]
pub struct SubmitReport {
    pub outcome: &'static str,
    pub payload: SubmissionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_response: Option<serde_json::Value>,
    pub status: Option<StatusBanner>,
}
