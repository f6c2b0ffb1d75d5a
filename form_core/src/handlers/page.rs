//! Server-rendered form page

use crate::{
    error::{AppError, Result},
    form::{FormValues, SubmitOutcome},
    webhook::WebhookTransport,
    AppState,
};
use axum::{
    extract::{Form, State},
    response::Html,
};
use std::collections::HashMap;
use tracing::info;

pub async fn handle_form_page<T: WebhookTransport>(State(state): State<AppState<T>>) -> Html<String> {
    info!("GET / - Rendering form with defaults");

    let controller = state.controller(FormValues::new());
    controller.apply_defaults();

    Html(state.render(&controller, false))
}

pub async fn handle_form_action<T: WebhookTransport>(
    State(state): State<AppState<T>>,
    Form(mut fields): Form<HashMap<String, String>>,
) -> Result<Html<String>> {
    let action = fields.remove("action").unwrap_or_else(|| "submit".to_string());
    info!("POST / - action: {}", action);

    let controller = state.controller(FormValues::from(fields));

    let reload = match action.as_str() {
        "submit" => matches!(controller.submit().await, SubmitOutcome::Submitted(_)),
        "preview" => {
            controller.preview()?;
            false
        }
        "suggest" => {
            if !controller.focus_area_changed() {
                info!("POST / - no focus area selected, nothing to suggest");
            }
            false
        }
        "test-connection" => {
            controller.test_connection().await;
            false
        }
        other => return Err(AppError::BadRequest(format!("Unknown action '{}'", other))),
    };

    Ok(Html(state.render(&controller, reload)))
}
