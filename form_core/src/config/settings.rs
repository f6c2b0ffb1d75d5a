use crate::webhook::WebhookEndpoint;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
    pub ui: UiConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where submissions are delivered.
///
/// `endpoint` may be absolute or a same-origin path; a path needs `origin`
/// so the client has an absolute URL to fall back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub endpoint: String,
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub reset_delay_ms: u64,
    pub status_auto_hide_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            webhook: WebhookConfig::default(),
            ui: UiConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5678/webhook/rmis-content-input".to_string(),
            origin: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 3000,
            status_auto_hide_ms: 10000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            permissive: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.toml")
    }

    /// Defaults, then the file at `path` if it exists, then `APP_*`
    /// environment variables (`APP_WEBHOOK__ENDPOINT`, `APP_SERVER__PORT`, ...).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.webhook.endpoint.trim().is_empty() {
            return Err(ConfigError::Message(
                "Webhook endpoint cannot be empty".to_string(),
            ));
        }

        let origin = self.origin_url()?;
        if origin.is_none() && Url::parse(&self.webhook.endpoint).is_err() {
            return Err(ConfigError::Message(format!(
                "Webhook endpoint '{}' is relative; set webhook.origin to resolve it",
                self.webhook.endpoint
            )));
        }

        if self.ui.reset_delay_ms == 0 || self.ui.status_auto_hide_ms == 0 {
            return Err(ConfigError::Message(
                "UI delays must be greater than 0".to_string(),
            ));
        }

        if self.cors.permissive {
            tracing::warn!("Permissive CORS enabled - any origin may call the API");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn webhook_endpoint(&self) -> Result<WebhookEndpoint, ConfigError> {
        let endpoint = WebhookEndpoint::new(self.webhook.endpoint.trim());
        Ok(match self.origin_url()? {
            Some(origin) => endpoint.with_origin(origin),
            None => endpoint,
        })
    }

    fn origin_url(&self) -> Result<Option<Url>, ConfigError> {
        self.webhook
            .origin
            .as_deref()
            .filter(|origin| !origin.trim().is_empty())
            .map(|origin| {
                Url::parse(origin.trim()).map_err(|e| {
                    ConfigError::Message(format!("Invalid webhook origin '{}': {}", origin, e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ui.reset_delay_ms, 3000);
        assert_eq!(config.ui.status_auto_hide_ms, 10000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.webhook.endpoint = "  ".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.ui.reset_delay_ms = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.webhook.origin = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_endpoint_needs_origin() {
        let mut config = AppConfig::default();
        config.webhook.endpoint = "/webhook/rmis-content-input".to_string();
        assert!(config.validate().is_err());

        config.webhook.origin = Some("https://forms.example.com".to_string());
        assert!(config.validate().is_ok());

        let endpoint = config.webhook_endpoint().unwrap();
        assert_eq!(endpoint.url(), "/webhook/rmis-content-input");
        assert_eq!(
            endpoint.absolute_url().as_deref(),
            Some("https://forms.example.com/webhook/rmis-content-input")
        );
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("absent.toml"))
            .expect("Should load default configuration");

        assert_eq!(config.webhook.origin, None);
        assert!(config.webhook.endpoint.ends_with("/webhook/rmis-content-input"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[webhook]
endpoint = "/webhook/rmis-content-input"
origin = "https://staging.example.com"

[ui]
reset_delay_ms = 500
status_auto_hide_ms = 2000
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).expect("Should load file configuration");

        assert_eq!(config.webhook.origin.as_deref(), Some("https://staging.example.com"));
        assert_eq!(config.ui.reset_delay_ms, 500);
        assert_eq!(config.server.port, 3000);
    }
}
