//! Core library for the RMIS content request form: validation, payload
//! assembly, webhook delivery and the axum routes that host the form.

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod ui;
pub mod validation;
pub mod views;
pub mod webhook;

pub use crate::config::AppConfig;
pub use error::{AppError, Result};
pub use form::{FormController, FormField, FormValues, InMemoryForm, SubmissionPayload, SubmitOutcome, UiTimings};
pub use handlers::create_routes;
pub use middleware::cors::{cors_layer, cors_layer_from_config, cors_layer_permissive};
pub use middleware::logging::logging_layer;
pub use ui::{StatusBanner, StatusKind, UiState};
pub use validation::{ValidationResult, Validatable};
pub use webhook::{ReqwestTransport, WebhookClient, WebhookEndpoint, WebhookError, WebhookTransport};

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState<T = ReqwestTransport> {
    pub app_name: String,
    pub version: String,
    pub webhook: WebhookClient<T>,
    pub timings: UiTimings,
}

impl AppState<ReqwestTransport> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let endpoint = config.webhook_endpoint()?;
        info!(
            endpoint = %endpoint.url(),
            fallback = ?endpoint.absolute_url(),
            "Webhook endpoint configured"
        );

        Ok(Self::new(
            WebhookClient::new(ReqwestTransport::new(), endpoint),
            UiTimings::from(&config.ui),
        ))
    }
}

impl<T: WebhookTransport> AppState<T> {
    pub fn new(webhook: WebhookClient<T>, timings: UiTimings) -> Self {
        Self {
            app_name: "RMIS Content Generator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            webhook,
            timings,
        }
    }

    /// A controller over a request-scoped view holding `values`.
    pub fn controller(&self, values: FormValues) -> FormController<InMemoryForm, T> {
        FormController::new(InMemoryForm::from_values(values), self.webhook.clone(), self.timings)
    }

    pub fn render(&self, controller: &FormController<InMemoryForm, T>, reload: bool) -> String {
        let page = controller.with_view(|form| {
            views::PageModel::from_form(&self.app_name, form, self.timings.status_auto_hide)
        });
        let page = if reload {
            page.reload_after(self.timings.reset_delay)
        } else {
            page
        };
        views::render_form_page(&page)
    }
}

pub fn create_app<T: WebhookTransport>(state: AppState<T>) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config<T: WebhookTransport>(state: AppState<T>, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes::<T>())
        .layer(cors_layer_from_config(&config.cors))
        .layer(logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
