//! Form controller: validation, payload assembly and the submit state machine.
//!
//! The controller owns its view behind a mutex shared with the delay timers
//! it spawns (form reset after success, banner auto-hide). The lock is never
//! held across the webhook call.

use super::fields::{FocusArea, FormField, GENERAL_MESSAGE, GENERAL_TOPIC};
use super::payload::SubmissionPayload;
use super::suggestions::{is_replaceable, suggestion_for};
use super::view::FormView;
use crate::config::UiConfig;
use crate::ui::{StatusBanner, StatusKind, UiState};
use crate::validation::{check_field, validate_required_fields, ValidationResult};
use crate::webhook::{
    TransportError, WebhookClient, WebhookEndpoint, WebhookError, WebhookResponse, WebhookTransport,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const VALIDATION_FAILED_MESSAGE: &str = "Please fix the validation errors before submitting.";
pub const SUBMITTING_MESSAGE: &str = "Submitting your request...";
pub const SUCCESS_MESSAGE: &str = "Content generation started successfully!";
pub const CORS_MESSAGE: &str = "CORS Configuration Required";
const SUBMITTING_DETAILS: &str = "Processing form data and initiating content generation workflow.";
const SUCCESS_DETAILS: &str = "Your request has been submitted to the workflow. Content generation typically takes 2-5 minutes. You will receive the generated content via email or through your configured notification system.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    pub reset_delay: Duration,
    pub status_auto_hide: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(3000),
            status_auto_hide: Duration::from_millis(10000),
        }
    }
}

impl From<&UiConfig> for UiTimings {
    fn from(config: &UiConfig) -> Self {
        Self {
            reset_delay: Duration::from_millis(config.reset_delay_ms),
            status_auto_hide: Duration::from_millis(config.status_auto_hide_ms),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(WebhookResponse),
    Invalid(ValidationResult),
    Failed(WebhookError),
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::Submitted(_) => "submitted",
            SubmitOutcome::Invalid(_) => "invalid",
            SubmitOutcome::Failed(_) => "failed",
            SubmitOutcome::Busy => "busy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ConnectionReport {
    Reachable { status: u16 },
    Unreachable { error: String },
}

struct Shared<V> {
    view: V,
    state: UiState,
    banner: Option<StatusBanner>,
    generation: u64,
}

impl<V: FormView> Shared<V> {
    fn show_status(&mut self, kind: StatusKind, message: &str, details: &str) -> u64 {
        self.generation += 1;
        let banner = StatusBanner::new(kind, message, details, self.generation);
        self.view.render_status(Some(&banner));
        self.banner = Some(banner);
        self.state = self.state.show_status(kind);
        self.generation
    }

    fn hide_status(&mut self) {
        self.banner = None;
        self.view.render_status(None);
        self.state = self.state.hide_status();
    }

    /// Hides the banner only if it is still the one `generation` refers to.
    fn hide_status_if_current(&mut self, generation: u64) -> bool {
        match &self.banner {
            Some(banner) if banner.generation == generation => {
                self.hide_status();
                true
            }
            _ => false,
        }
    }

    fn validate_field(&mut self, field: FormField) -> bool {
        match check_field(field, &self.view.value(field)) {
            Ok(()) => {
                self.view.clear_field_error(field);
                true
            }
            Err(err) => {
                self.view.show_field_error(field, &err.to_string());
                false
            }
        }
    }

    fn validate_form(&mut self) -> ValidationResult {
        let result = validate_required_fields(&self.view.values());
        for field in FormField::REQUIRED {
            match result.field_error(field).and_then(|e| e.errors.first()) {
                Some(message) => self.view.show_field_error(field, message),
                None => self.view.clear_field_error(field),
            }
        }
        result
    }

    fn apply_defaults(&mut self) {
        for field in FormField::ALL {
            if let Some(prefill) = field.prefill() {
                if self.view.value(field).is_empty() {
                    self.view.set_value(field, prefill);
                }
            }
        }
    }

    fn reset(&mut self) -> bool {
        if self.state.is_submitting() {
            return false;
        }

        self.view.clear();
        self.apply_defaults();
        for field in FormField::ALL {
            self.view.clear_field_error(field);
        }
        self.hide_status();
        self.state = UiState::Idle;
        true
    }
}

pub struct FormController<V, T> {
    shared: Arc<Mutex<Shared<V>>>,
    client: WebhookClient<T>,
    timings: UiTimings,
}

impl<V: FormView, T: WebhookTransport> FormController<V, T> {
    pub fn new(view: V, client: WebhookClient<T>, timings: UiTimings) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                view,
                state: UiState::Idle,
                banner: None,
                generation: 0,
            })),
            client,
            timings,
        }
    }

    pub fn state(&self) -> UiState {
        self.shared.lock().state
    }

    pub fn banner(&self) -> Option<StatusBanner> {
        self.shared.lock().banner.clone()
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.shared.lock().view)
    }

    /// Direct access to the view, e.g. for user edits.
    pub fn with_view_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.shared.lock().view)
    }

    pub fn validate_field(&self, field: FormField) -> bool {
        self.shared.lock().validate_field(field)
    }

    pub fn clear_field_error(&self, field: FormField) {
        self.shared.lock().view.clear_field_error(field);
    }

    /// Validates every required field, marking each one, and reports whether
    /// all passed.
    pub fn validate_form(&self) -> bool {
        self.validation_report().is_valid
    }

    pub fn validation_report(&self) -> ValidationResult {
        self.shared.lock().validate_form()
    }

    pub fn build_payload(&self) -> SubmissionPayload {
        SubmissionPayload::from_values(&self.shared.lock().view.values())
    }

    pub fn preview(&self) -> serde_json::Result<String> {
        let json = self.build_payload().to_pretty_json()?;
        self.shared.lock().view.show_preview(&json);
        Ok(json)
    }

    pub fn close_preview(&self) {
        self.shared.lock().view.hide_preview();
    }

    pub fn apply_defaults(&self) {
        self.shared.lock().apply_defaults();
    }

    /// Replaces topic and message with the selected area's suggestion where
    /// they are empty or untouched. Returns false for an unknown area.
    pub fn focus_area_changed(&self) -> bool {
        let mut shared = self.shared.lock();
        let Some(area) = FocusArea::parse(shared.view.value(FormField::FocusArea).trim()) else {
            return false;
        };

        let suggestion = suggestion_for(area);
        if is_replaceable(&shared.view.value(FormField::SpecificTopic), GENERAL_TOPIC) {
            shared.view.set_value(FormField::SpecificTopic, suggestion.topic);
        }
        if is_replaceable(&shared.view.value(FormField::KeyMessage), GENERAL_MESSAGE) {
            shared.view.set_value(FormField::KeyMessage, suggestion.message);
        }
        debug!(area = %area, "applied focus area suggestion");
        true
    }

    /// Shows a banner; success and error banners hide after the auto-hide delay.
    pub fn show_status(&self, kind: StatusKind, message: &str, details: &str) -> u64 {
        let generation = self.shared.lock().show_status(kind, message, details);

        if kind.auto_hides() {
            self.schedule(self.timings.status_auto_hide, move |shared| {
                if shared.hide_status_if_current(generation) {
                    debug!(generation, "status banner auto-hidden");
                }
            });
        }

        generation
    }

    pub fn hide_status(&self) {
        self.shared.lock().hide_status();
    }

    /// Clears the form back to its pre-filled state. Ignored while a
    /// submission is in flight.
    pub fn reset_form(&self) -> bool {
        self.shared.lock().reset()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.state().is_submitting() {
            warn!("submit ignored, a submission is already in flight");
            return SubmitOutcome::Busy;
        }

        let report = self.validation_report();
        if !report.is_valid {
            info!(fields = report.errors.len(), "submission blocked by validation errors");
            self.show_status(StatusKind::Error, VALIDATION_FAILED_MESSAGE, "");
            return SubmitOutcome::Invalid(report);
        }

        let payload = {
            let mut shared = self.shared.lock();
            let Some(next) = shared.state.begin_submit() else {
                return SubmitOutcome::Busy;
            };
            shared.state = next;
            shared.view.set_controls_enabled(false);
            SubmissionPayload::from_values(&shared.view.values())
        };
        self.show_status(StatusKind::Loading, SUBMITTING_MESSAGE, SUBMITTING_DETAILS);

        let submission_id = Uuid::new_v4();
        info!(
            %submission_id,
            endpoint = %self.client.endpoint().url(),
            focus_area = %payload.focus_area,
            "submitting content request"
        );

        let result = self.client.post(&payload).await;

        {
            let mut shared = self.shared.lock();
            shared.state = shared.state.settle();
            shared.view.set_controls_enabled(true);
        }

        match result {
            Ok(response) => {
                info!(%submission_id, status = response.status, "content request accepted");
                self.show_status(StatusKind::Success, SUCCESS_MESSAGE, SUCCESS_DETAILS);
                self.schedule(self.timings.reset_delay, |shared| {
                    if !shared.reset() {
                        debug!("scheduled reset skipped, a newer submission is in flight");
                    }
                });
                SubmitOutcome::Submitted(response)
            }
            Err(err) => {
                error!(%submission_id, error = %err, "content request failed");
                let (message, details) = describe_failure(&err, self.client.endpoint());
                self.show_status(StatusKind::Error, &message, &details);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Checks that the webhook answers at all. A 404 is the usual answer of a
    /// POST-only webhook and counts as reachable.
    pub async fn test_connection(&self) -> ConnectionReport {
        self.show_status(
            StatusKind::Loading,
            "Testing connection to webhook...",
            "Checking that the endpoint is reachable from this origin.",
        );

        match self.client.check_reachable().await {
            Ok(status) => {
                let details = if status == 404 {
                    "The webhook is accessible and responding. You can now submit the form.".to_string()
                } else {
                    format!("Webhook responded with status {}. The endpoint appears to be reachable.", status)
                };
                self.show_status(StatusKind::Success, "Connection Successful!", &details);
                ConnectionReport::Reachable { status }
            }
            Err(err) => {
                warn!(error = %err, "connection test failed");
                match &err {
                    TransportError::Network { .. } => self.show_status(
                        StatusKind::Error,
                        CORS_MESSAGE,
                        &format!(
                            "The workflow instance is blocking requests from this domain ({}). Please configure CORS on the workflow instance to allow this domain.",
                            page_origin(self.client.endpoint())
                        ),
                    ),
                    TransportError::InvalidUrl { .. } => self.show_status(
                        StatusKind::Error,
                        "Connection Test Failed",
                        &format!("Could not connect to webhook. Error: {}", err),
                    ),
                };
                ConnectionReport::Unreachable {
                    error: err.to_string(),
                }
            }
        }
    }

    fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce(&mut Shared<V>) + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, delayed UI task not scheduled");
            return;
        };

        let shared = Arc::clone(&self.shared);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = shared.lock();
            task(&mut guard);
        });
    }
}

/// Origin the form is served from, as far as the endpoint knows it.
fn page_origin(endpoint: &WebhookEndpoint) -> String {
    endpoint
        .origin()
        .map(|origin| origin.origin().ascii_serialization())
        .unwrap_or_else(|| "this origin".to_string())
}

/// Short message and explanatory detail for a failed submission.
pub fn describe_failure(err: &WebhookError, endpoint: &WebhookEndpoint) -> (String, String) {
    let url = endpoint.url();
    match err {
        WebhookError::Transport(transport @ TransportError::Network { .. }) => (
            CORS_MESSAGE.to_string(),
            format!(
                "The workflow instance needs to allow requests from this domain ({}). Please add this domain to its CORS settings, or contact your system administrator. ({})",
                page_origin(endpoint),
                transport
            ),
        ),
        WebhookError::HttpStatus { status: 405, .. } => (
            "Method Not Allowed (405)".to_string(),
            "The webhook might not be configured correctly for POST requests. Please check your workflow webhook configuration.".to_string(),
        ),
        other => (
            "Submission failed".to_string(),
            format!(
                "Error: {}. Please check your webhook URL configuration. Current URL: {}",
                other, url
            ),
        ),
    }
}
