//! Serializable logger configuration

use super::drain::DEFAULT_QUEUE_CAPACITY;
use super::error::{LoggerError, Result};
use super::features::Features;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Root logger settings as they appear in a configuration file.
///
/// # Examples
///
/// ```
/// use rust_queue_logger::{Features, LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(
///     r#"{ "level": "debug", "features": "time,micros,prefix", "prefix": "[api]" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert!(config.features.contains(Features::MICROSECONDS | Features::PREFIX_INFO));
/// assert_eq!(config.queue_capacity, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub features: Features,
    pub prefix: String,
    pub queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            features: Features::DEFAULT,
            prefix: String::new(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl LoggerConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue_capacity must be greater than 0",
            ));
        }
        Ok(())
    }
}
