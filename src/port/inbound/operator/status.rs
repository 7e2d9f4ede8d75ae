//! Status projection types for operator-facing adapters.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::stats::{PoolHealth, PoolStats};
use crate::error::Result;

/// Point-in-time view of a running pool.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub health: PoolHealth,
    pub consumers: Vec<String>,
    pub size_per_key: usize,
    pub max_idle_secs: u64,
    pub stats: PoolStats,
}

/// Status use-cases for operator-facing adapters.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait StatusOperator: Send + Sync {
    /// Decode the status document written by a running pool.
    fn load_status(&self, status_json: &str) -> Result<StatusSnapshot>;
}
