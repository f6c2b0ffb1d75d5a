//! JSON API over the form controller

use crate::{
    form::{ConnectionReport, FormValues, SubmissionPayload, SubmitOutcome},
    models::request::{ApiResponse, SubmitReport},
    validation::ValidationResult,
    webhook::{WebhookError, WebhookTransport},
    AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_validate<T: WebhookTransport>(
    State(state): State<AppState<T>>,
    Json(values): Json<FormValues>,
) -> impl IntoResponse {
    let report = state.controller(values).validation_report();
    info!("POST /api/validate - valid: {}", report.is_valid);

    let status = if report.is_valid {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    (status, Json(ApiResponse::<ValidationResult>::success(report)))
}

pub async fn handle_preview<T: WebhookTransport>(
    State(state): State<AppState<T>>,
    Json(values): Json<FormValues>,
) -> Json<ApiResponse<SubmissionPayload>> {
    info!("POST /api/preview");
    Json(ApiResponse::success(state.controller(values).build_payload()))
}

pub async fn handle_submit<T: WebhookTransport>(
    State(state): State<AppState<T>>,
    Json(values): Json<FormValues>,
) -> impl IntoResponse {
    let controller = state.controller(values);
    let payload = controller.build_payload();
    let outcome = controller.submit().await;
    info!("POST /api/submit - outcome: {}", outcome.label());

    let mut report = SubmitReport {
        outcome: outcome.label(),
        payload,
        validation: None,
        webhook_response: None,
        status: controller.banner(),
    };

    let (status, response) = match outcome {
        SubmitOutcome::Submitted(response) => {
            report.webhook_response = Some(response.body);
            (StatusCode::OK, ApiResponse::success(report))
        }
        SubmitOutcome::Invalid(validation) => {
            report.validation = Some(validation);
            (StatusCode::UNPROCESSABLE_ENTITY, failed(report))
        }
        SubmitOutcome::Failed(err) => {
            let status = match err {
                WebhookError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, failed(report))
        }
        SubmitOutcome::Busy => (StatusCode::CONFLICT, failed(report)),
    };

    (status, Json(response))
}

pub async fn handle_connection_test<T: WebhookTransport>(
    State(state): State<AppState<T>>,
) -> Json<ApiResponse<ConnectionReport>> {
    let controller = state.controller(FormValues::new());
    let report = controller.test_connection().await;
    info!("GET /api/connection-test - {:?}", report);

    let response = ApiResponse::success(report);
    Json(match controller.banner() {
        Some(banner) => response.with_message(banner.details),
        None => response,
    })
}

/// Failure envelope that still carries the report as data.
fn failed(report: SubmitReport) -> ApiResponse<SubmitReport> {
    let message = report
        .status
        .as_ref()
        .map(|banner| banner.message.clone())
        .unwrap_or_else(|| format!("Submission {}", report.outcome));
    ApiResponse {
        data: Some(report),
        ..ApiResponse::error(message)
    }
}
