use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, AvailabilitySettings, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Application configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config file (if any) plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::from_app(AppConfig::load_or_default()?))
    }

    pub fn from_app(app: AppConfig) -> Self {
        Self { app, token: None }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::from_app(builder.build()?))
    }

    /// Set the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the session token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url().trim_end_matches('/'), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.api_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Whether a remote API is configured (otherwise the app runs offline)
    pub fn has_remote_api(&self) -> bool {
        self.app.api_url.is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout()
    }

    pub fn availability(&self) -> &AvailabilitySettings {
        &self.app.availability
    }
}
