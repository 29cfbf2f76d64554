//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceSection,
    pub monitor: MonitorSection,
    #[serde(default)]
    pub narrative: NarrativeSection,
    pub logging: LoggingSection,
}

/// Listing page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    /// Listing page URL
    pub url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// How many times to re-fetch while waiting for the page to settle
    pub settle_attempts: u32,
    /// Delay between settle attempts in seconds
    pub settle_delay_secs: u64,
}

/// Monitoring loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Wait between poll cycles in seconds
    pub poll_interval_secs: u64,
    /// Wait after a failed fetch before retrying in seconds
    pub retry_delay_secs: u64,
    /// How many most-recent records the market summary analyzes
    pub recent_limit: usize,
}

/// AI narrative configuration (optional; disabled runs heuristics only)
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeSection {
    /// Enable AI narrative generation for new tokens
    #[serde(default)]
    pub enabled: bool,
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Response token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Attempts before falling back to a synthesized narrative
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// API key; prefer the OPENAI_API_KEY env var over committing this
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gpt-3.5-turbo-0125".to_string()
}

fn default_max_tokens() -> u32 {
    250
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for NarrativeSection {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            api_key: None,
        }
    }
}

impl NarrativeSection {
    /// Get API key with environment variable fallback
    /// Checks OPENAI_API_KEY env var if config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("OPENAI_API_KEY").ok()
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Append-only update log path (supports ~)
    pub update_log: String,
}

impl LoggingSection {
    /// Update log path with ~ expanded
    pub fn update_log_path(&self) -> String {
        shellexpand::tilde(&self.update_log).to_string()
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "source url cannot be empty".to_string(),
            ));
        }

        if self.source.settle_attempts == 0 {
            return Err(ConfigError::ValidationError(format!(
                "settle_attempts must be > 0, got {}",
                self.source.settle_attempts
            )));
        }

        if self.source.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be > 0".to_string(),
            ));
        }

        if self.monitor.recent_limit == 0 {
            return Err(ConfigError::ValidationError(format!(
                "recent_limit must be > 0, got {}",
                self.monitor.recent_limit
            )));
        }

        if self.narrative.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "narrative max_attempts must be > 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.narrative.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "narrative temperature must be 0-2, got {}",
                self.narrative.temperature
            )));
        }

        if self.logging.update_log.is_empty() {
            return Err(ConfigError::ValidationError(
                "update_log cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
