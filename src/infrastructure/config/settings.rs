//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; credentials may be pulled from
//! environment variables when consumers are resolved.
//!
//! # Example
//!
//! ```no_run
//! use warmpool::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::consumer::ConsumerSettings;
use super::logging::LoggingConfig;
use crate::application::pool::config::{PoolConfig, MAX_DURATION_SECS};
use crate::domain::id::ConsumerId;
use crate::domain::model::ConsumerConfig;
use crate::error::{ConfigError, Result};

/// Status file settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Where `run` writes its status snapshot. Defaults to
    /// `~/.warmpool/status.json`.
    #[serde(default)]
    pub file: Option<String>,

    /// Seconds between status snapshots.
    #[serde(default = "default_status_interval_secs")]
    pub interval_secs: u64,
}

const fn default_status_interval_secs() -> u64 {
    30
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            file: None,
            interval_secs: default_status_interval_secs(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Pool sizing and eviction.
    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub status: StatusConfig,

    /// Consumers prewarmed at startup.
    #[serde(default)]
    pub consumers: Vec<ConsumerSettings>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., zero pool size, duplicate consumer ids)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// Structural checks only; credentials are checked when consumers are
    /// resolved.
    fn validate(&self) -> Result<()> {
        self.pool.validate()?;

        if self.status.interval_secs == 0 || self.status.interval_secs > MAX_DURATION_SECS {
            return Err(ConfigError::InvalidValue {
                field: "status.interval_secs",
                reason: format!("must be between 1 and {MAX_DURATION_SECS}"),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for consumer in &self.consumers {
            consumer.validate()?;
            if !seen.insert(consumer.id.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "consumers",
                    reason: format!("duplicate consumer id '{}'", consumer.id),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Resolve every consumer into its runtime config.
    ///
    /// # Errors
    ///
    /// Returns the first consumer that fails to resolve.
    pub fn resolve_consumers(&self) -> Result<Vec<(ConsumerId, ConsumerConfig)>> {
        self.consumers
            .iter()
            .map(|c| Ok((c.consumer_id(), c.resolve()?)))
            .collect()
    }

    /// Look up one consumer's settings.
    #[must_use]
    pub fn consumer(&self, id: &str) -> Option<&ConsumerSettings> {
        self.consumers.iter().find(|c| c.id == id)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
