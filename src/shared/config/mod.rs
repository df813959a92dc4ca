//! Application configuration module
//!
//! Provides configuration types for the application. Configuration is read
//! from an optional TOML file and can be overridden from the environment:
//!
//! ```toml
//! api_url = "https://api.voicemate.app"
//! request_timeout_secs = 10
//!
//! [availability]
//! debounce_ms = 600
//! cache_ttl_ms = 500
//! min_length = 3
//! max_length = 30
//! error_threshold = 2
//! suggestion_count = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::shared::candidate::{CandidateRules, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "VOICEMATE_API_URL";

/// Tunables of the live PulseID availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilitySettings {
    /// Quiet interval before a query is dispatched
    pub debounce_ms: u64,
    /// How long a cached answer stays authoritative
    pub cache_ttl_ms: u64,
    pub min_length: usize,
    pub max_length: usize,
    /// Consecutive query failures before the cache is flushed
    pub error_threshold: u32,
    pub suggestion_count: usize,
}

impl Default for AvailabilitySettings {
    fn default() -> Self {
        Self {
            debounce_ms: 600,
            cache_ttl_ms: 500,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            error_threshold: 2,
            suggestion_count: 3,
        }
    }
}

impl AvailabilitySettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn rules(&self) -> CandidateRules {
        CandidateRules {
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::Invalid("debounce_ms must be greater than 0".into()));
        }
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(ConfigError::Invalid(
                "min_length must be at least 1 and not exceed max_length".into(),
            ));
        }
        if self.error_threshold == 0 {
            return Err(ConfigError::Invalid("error_threshold must be at least 1".into()));
        }
        if !(1..=5).contains(&self.suggestion_count) {
            return Err(ConfigError::Invalid("suggestion_count must be between 1 and 5".into()));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL; `None` runs against the in-memory backend
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    pub availability: AvailabilitySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: 10,
            availability: AvailabilitySettings::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.api_url {
            let parsed = reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be greater than 0".into()));
        }
        self.availability.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// `<config dir>/voicemate/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voicemate").join("config.toml"))
    }

    /// Load the default config file if it exists, then apply env overrides
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::load(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `VOICEMATE_API_URL` if set
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let url = url.trim();
            self.api_url = if url.is_empty() { None } else { Some(url.to_string()) };
        }
        self.validate()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    availability: Option<AvailabilitySettings>,
}

impl AppConfigBuilder {
    /// Set the backend URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn availability(mut self, settings: AvailabilitySettings) -> Self {
        self.availability = Some(settings);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            api_url: self.api_url,
            request_timeout_secs: self.request_timeout_secs.unwrap_or(defaults.request_timeout_secs),
            availability: self.availability.unwrap_or(defaults.availability),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
