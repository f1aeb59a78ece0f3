//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Environment variable that overrides `api.token`.
pub const TOKEN_ENV_VAR: &str = "BRAWL_API_TOKEN";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upstream game API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the upstream API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; usually supplied through the environment instead
    #[serde(default)]
    pub token: Option<String>,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.brawlstars.com/v1".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Statistics tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Battles kept in the per-brawler recent window
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
}

fn default_recent_window() -> usize {
    20
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_window: default_recent_window(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults, then
    /// apply the token from the environment.
    pub fn load(path: &PathBuf) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            info!("Loading config from {}", path.display());
            Self::from_file(path)?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_token_override(std::env::var(TOKEN_ENV_VAR).ok()))
    }

    /// Replace the configured token with `token` when it is non-empty.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }

    /// Log filter to use: the command-line level when given, else the
    /// configured one.
    pub fn log_level_or<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.filter(|l| !l.trim().is_empty())
            .unwrap_or(self.log_level.as_str())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "Invalid API base URL {:?}: {}",
                self.api.base_url, e
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "API base URL must be http(s), got {}",
                base.scheme()
            )));
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.stats.recent_window == 0 {
            return Err(ConfigError::ValidationError(
                "Recent window must hold at least one battle".to_string(),
            ));
        }

        Ok(())
    }
}
