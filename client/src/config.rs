//! Configuration management for the AgriYield client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Time-series view configuration
    pub view: ViewConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the time-series endpoints
    pub base_url: String,

    /// Base URL of `/predict`, when served separately
    #[serde(default)]
    pub prediction_base_url: Option<String>,

    /// Per-request timeout; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    /// Forecast horizon used until the user changes it
    pub default_horizon_days: u32,

    /// History window requested by the History tab
    pub history_days: u32,

    /// Trailing points drawn in the history chart
    pub history_chart_window: usize,
}

impl ApiConfig {
    pub fn prediction_url(&self) -> &str {
        self.prediction_base_url.as_deref().unwrap_or(&self.base_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:3001")?
            .set_default("view.default_horizon_days", 30)?
            .set_default("view.history_days", 365)?
            .set_default("view.history_chart_window", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI__ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject values the view could never use
    pub fn validate(&self) -> ClientResult<()> {
        for url in [self.api.base_url.as_str(), self.api.prediction_url()] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ClientError::Configuration(format!(
                    "API URL must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }
        shared::validate_horizon(self.view.default_horizon_days)
            .map_err(|e| ClientError::Configuration(format!("view.default_horizon_days: {}", e)))?;
        shared::validate_history_period(self.view.history_days)
            .map_err(|e| ClientError::Configuration(format!("view.history_days: {}", e)))?;
        if self.view.history_chart_window == 0 {
            return Err(ClientError::Configuration(
                "view.history_chart_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            prediction_base_url: None,
            timeout_secs: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: shared::DEFAULT_HORIZON_DAYS,
            history_days: shared::DEFAULT_HISTORY_DAYS,
            history_chart_window: shared::HISTORY_CHART_WINDOW,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            view: ViewConfig::default(),
        }
    }
}
