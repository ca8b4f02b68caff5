use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const ENV_PREFIX: &str = "MARKETPLACE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mock: MockConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

/// Simulated backend delays, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_catalog_latency")]
    pub catalog_latency_ms: u64,
    #[serde(default = "default_detail_latency")]
    pub detail_latency_ms: u64,
    #[serde(default = "default_messages_latency")]
    pub messages_latency_ms: u64,
    #[serde(default = "default_submit_latency")]
    pub submit_latency_ms: u64,
    /// Saving the profile settings form
    #[serde(default = "default_settings_latency")]
    pub settings_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

impl Config {
    /// Read every section from `MARKETPLACE_*` environment variables
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let settings = environment_settings()?;
        let config = Config {
            server: ServerConfig::from_settings(settings.clone())?,
            mock: MockConfig::from_env()?,
            observability: ObservabilityConfig::from_settings(settings)?,
        };

        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.server.max_request_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "Max request size cannot be 0".to_string(),
            });
        }

        if self.observability.service_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Service name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn environment_settings() -> Result<config::Config, ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to read environment: {}", e),
        })
}

impl ServerConfig {
    pub(crate) fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize server config: {}", e),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl MockConfig {
    fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(format!("{}_", ENV_PREFIX))
            .from_env()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize mock config: {}", e),
            })
    }

    /// Parse from explicit `(name, value)` pairs, names carrying the `MARKETPLACE_` prefix
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(format!("{}_", ENV_PREFIX))
            .from_iter(vars)
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize mock config: {}", e),
            })
    }

    /// No artificial delay anywhere
    pub fn instant() -> Self {
        Self {
            catalog_latency_ms: 0,
            detail_latency_ms: 0,
            messages_latency_ms: 0,
            submit_latency_ms: 0,
            settings_latency_ms: 0,
        }
    }

    pub fn catalog_latency(&self) -> Duration {
        Duration::from_millis(self.catalog_latency_ms)
    }

    pub fn detail_latency(&self) -> Duration {
        Duration::from_millis(self.detail_latency_ms)
    }

    pub fn messages_latency(&self) -> Duration {
        Duration::from_millis(self.messages_latency_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn settings_latency(&self) -> Duration {
        Duration::from_millis(self.settings_latency_ms)
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            catalog_latency_ms: default_catalog_latency(),
            detail_latency_ms: default_detail_latency(),
            messages_latency_ms: default_messages_latency(),
            submit_latency_ms: default_submit_latency(),
            settings_latency_ms: default_settings_latency(),
        }
    }
}

impl ObservabilityConfig {
    pub(crate) fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        let mut config: Self =
            settings
                .try_deserialize()
                .map_err(|e| ConfigError::LoadError {
                    message: format!("Failed to deserialize observability config: {}", e),
                })?;

        // An empty endpoint means export is off
        config.otlp_endpoint = config
            .otlp_endpoint
            .filter(|endpoint| !endpoint.trim().is_empty());
        Ok(config)
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

pub(crate) fn default_catalog_latency() -> u64 {
    800
}

pub(crate) fn default_detail_latency() -> u64 {
    800
}

pub(crate) fn default_messages_latency() -> u64 {
    500
}

pub(crate) fn default_submit_latency() -> u64 {
    1500
}

pub(crate) fn default_settings_latency() -> u64 {
    1000
}

pub(crate) fn default_service_name() -> String {
    "marketplace-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
