//! Connection pool configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection pool configuration.
///
/// These settings control how many idle client handles each key keeps warm
/// and how long they may sit unused before the reaper recycles them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Idle connections kept per key (the pool capacity).
    #[serde(default = "default_size_per_key")]
    pub size_per_key: usize,
    /// Maximum seconds a connection may sit idle before it is recycled.
    #[serde(default = "default_max_idle_secs")]
    pub max_idle_secs: u64,
    /// Reaper tick interval in seconds.
    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,
    /// Maximum connection age in seconds, checked on release.
    ///
    /// 0 (the default) disables the check, so a connection lives until it
    /// idles out or its key is cleared. Setting it to `max_idle_secs`
    /// retires any connection older than the idle limit when it comes back,
    /// even one that was kept busy the whole time.
    #[serde(default)]
    pub max_lifetime_secs: u64,
}

const fn default_size_per_key() -> usize {
    5
}

const fn default_max_idle_secs() -> u64 {
    600 // 10 minutes
}

const fn default_reap_interval_secs() -> u64 {
    60
}

/// Upper bound for every duration setting: ten years.
pub const MAX_DURATION_SECS: u64 = 10 * 365 * 24 * 60 * 60;

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size_per_key: default_size_per_key(),
            max_idle_secs: default_max_idle_secs(),
            reap_interval_secs: default_reap_interval_secs(),
            max_lifetime_secs: 0,
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid:
    /// - `size_per_key` must be > 0
    /// - `max_idle_secs` must be > 0
    /// - `reap_interval_secs` must be > 0
    /// - no duration may exceed [`MAX_DURATION_SECS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| ConfigError::InvalidValue {
            field,
            reason: reason.to_string(),
        };

        if self.size_per_key == 0 {
            return Err(invalid("size_per_key", "must be > 0"));
        }
        if self.max_idle_secs == 0 {
            return Err(invalid("max_idle_secs", "must be > 0"));
        }
        if self.reap_interval_secs == 0 {
            return Err(invalid("reap_interval_secs", "must be > 0"));
        }
        for (field, secs) in [
            ("max_idle_secs", self.max_idle_secs),
            ("reap_interval_secs", self.reap_interval_secs),
            ("max_lifetime_secs", self.max_lifetime_secs),
        ] {
            if secs > MAX_DURATION_SECS {
                return Err(invalid(
                    field,
                    &format!("must be <= {MAX_DURATION_SECS} seconds"),
                ));
            }
        }
        Ok(())
    }

    /// Idle limit. Saturates instead of overflowing.
    #[must_use]
    pub fn max_idle(&self) -> chrono::Duration {
        saturating_seconds(self.max_idle_secs)
    }

    #[must_use]
    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }

    /// Lifetime limit, or `None` when disabled.
    #[must_use]
    pub fn max_lifetime(&self) -> Option<chrono::Duration> {
        (self.max_lifetime_secs > 0).then(|| saturating_seconds(self.max_lifetime_secs))
    }
}

fn saturating_seconds(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}
