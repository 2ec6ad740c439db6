use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the library configuration including loading and
/// validating configuration settings supplied by the hosting application.
/// Represents the full library configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Remote directory/record API settings
    pub api: ApiConfig,

    /// Input text format settings
    #[serde(default)]
    pub input: InputConfig,

    /// Review/report display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the remote directory and record-creation API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    // @field: Base URL of the directory/record service
    pub endpoint: String,

    // @field: Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retry attempts for transport failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff in ms, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// Settings governing how submitted text is parsed
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    // @field: Words accepted as the date-range connective ("15-01-2025 a 20-01-2025")
    #[serde(default = "default_range_connectives")]
    pub range_connectives: Vec<String>,

    // @field: Person-field words meaning "the whole squad"
    #[serde(default = "default_team_sentinels")]
    pub team_sentinels: Vec<String>,
}

/// Settings governing preview and report rendering
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    // @field: Max successes listed in a rendered commit summary
    #[serde(default = "default_max_shown_successes")]
    pub max_shown_successes: usize,

    // @field: Max failures listed in a rendered commit summary
    #[serde(default = "default_max_shown_failures")]
    pub max_shown_failures: usize,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_range_connectives() -> Vec<String> {
    vec!["a".to_string(), "to".to_string()]
}

fn default_team_sentinels() -> Vec<String> {
    vec![
        "all".to_string(),
        "team".to_string(),
        "todos".to_string(),
        "equipo".to_string(),
    ]
}

fn default_max_shown_successes() -> usize {
    10
}

fn default_max_shown_failures() -> usize {
    5
}

impl Config {
    /// Parse a configuration from a JSON string supplied by the host
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration back to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.is_empty() {
            return Err(anyhow!("API endpoint is required"));
        }

        url::Url::parse(&self.api.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.api.endpoint, e))?;

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("API timeout must be greater than zero"));
        }

        if self.input.range_connectives.is_empty() {
            return Err(anyhow!("At least one date-range connective is required"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            input: InputConfig::default(),
            display: DisplayConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            range_connectives: default_range_connectives(),
            team_sentinels: default_team_sentinels(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_shown_successes: default_max_shown_successes(),
            max_shown_failures: default_max_shown_failures(),
        }
    }
}
