//! Configuration projections for operator-facing adapters.

use serde::Serialize;

use crate::error::Result;

/// One model slot of a consumer, as configured.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSlotView {
    pub role: String,
    pub provider: String,
    pub model: String,
    /// `inline` or `$VARIABLE`.
    pub key_source: String,
}

/// One consumer and whether it resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumerView {
    pub id: String,
    pub kind: String,
    pub models: Vec<ModelSlotView>,
    /// Why the consumer failed to resolve, if it did.
    pub error: Option<String>,
}

/// Pool section of a configuration view.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSettingsView {
    pub size_per_key: usize,
    pub max_idle_secs: u64,
    pub reap_interval_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Output of `check config`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigCheckReport {
    pub pool: PoolSettingsView,
    pub consumers: Vec<ConsumerView>,
}

impl ConfigCheckReport {
    /// Consumers that failed to resolve.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.consumers.iter().filter(|c| c.error.is_some()).count()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed() == 0
    }
}

/// Configuration use-cases for operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Parse and validate config, then try to resolve every consumer.
    ///
    /// Structural problems are errors; per-consumer resolution failures are
    /// reported in the returned [`ConfigCheckReport`].
    fn check_config(&self, config_toml: &str) -> Result<ConfigCheckReport>;
}
