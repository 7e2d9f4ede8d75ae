//! Read-only pool statistics snapshot.
//!
//! Produced under the registry lock and handed out by value, so callers can
//! compute derived figures (utilization, health) without touching the pool.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::PoolKey;

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Connections ever constructed (prewarmed or temporary).
    pub total_created: u64,
    /// Acquires served from an idle queue.
    pub total_reused: u64,
    /// Releases that returned a connection to its idle queue.
    pub total_released: u64,
    /// Connections disposed of for any reason.
    pub total_recycled: u64,
    /// Connections currently checked out.
    pub current_active: usize,
    /// Connections currently waiting in idle queues.
    pub current_idle: usize,
}

/// Active share above which the registry is reported as busy.
pub const BUSY_ACTIVE_RATIO: f64 = 0.9;

/// Coarse health derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolHealth {
    /// No live connections at all.
    Empty,
    Healthy,
    /// More than 90% of live connections are checked out.
    Busy,
}

impl PoolHealth {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Healthy => "healthy",
            Self::Busy => "busy",
        }
    }
}

impl fmt::Display for PoolHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GlobalStats {
    /// Live connections, busy or idle.
    #[must_use]
    pub fn live(&self) -> usize {
        self.current_active + self.current_idle
    }

    /// Share of live connections that are checked out.
    #[must_use]
    pub fn active_ratio(&self) -> f64 {
        match self.live() {
            0 => 0.0,
            live => self.current_active as f64 / live as f64,
        }
    }

    #[must_use]
    pub fn health(&self) -> PoolHealth {
        if self.live() == 0 {
            PoolHealth::Empty
        } else if self.active_ratio() > BUSY_ACTIVE_RATIO {
            PoolHealth::Busy
        } else {
            PoolHealth::Healthy
        }
    }
}

/// Per-key detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoolStats {
    pub key: PoolKey,
    pub idle_count: usize,
    pub busy_count: usize,
    pub capacity: usize,
}

impl KeyPoolStats {
    /// Share of the idle reserve currently missing: `(capacity - idle) / capacity`.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.capacity.saturating_sub(self.idle_count) as f64 / self.capacity as f64
    }
}

/// Snapshot of the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub global: GlobalStats,
    /// One entry per existing key pool, ordered by key.
    pub pools: Vec<KeyPoolStats>,
}

impl PoolStats {
    #[must_use]
    pub fn total_pools(&self) -> usize {
        self.pools.len()
    }

    /// Mean per-key utilization, 0 when there are no pools.
    #[must_use]
    pub fn average_utilization(&self) -> f64 {
        if self.pools.is_empty() {
            return 0.0;
        }
        self.pools.iter().map(KeyPoolStats::utilization).sum::<f64>() / self.pools.len() as f64
    }

    /// Detail for `key`, if a pool exists for it.
    #[must_use]
    pub fn pool(&self, key: &PoolKey) -> Option<&KeyPoolStats> {
        self.pools.iter().find(|p| &p.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ConsumerId;

    fn global(active: usize, idle: usize) -> GlobalStats {
        GlobalStats {
            current_active: active,
            current_idle: idle,
            ..GlobalStats::default()
        }
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(global(0, 0).health(), PoolHealth::Empty);
        assert_eq!(global(9, 1).health(), PoolHealth::Healthy);
        assert_eq!(global(10, 1).health(), PoolHealth::Busy);
        assert_eq!(global(0, 5).health(), PoolHealth::Healthy);
    }

    #[test]
    fn utilization_counts_missing_idle() {
        let pool = KeyPoolStats {
            key: PoolKey::primary(ConsumerId::new("1")),
            idle_count: 1,
            busy_count: 4,
            capacity: 4,
        };
        assert!((pool.utilization() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn average_utilization_over_pools() {
        let mk = |id: &str, idle| KeyPoolStats {
            key: PoolKey::primary(ConsumerId::new(id)),
            idle_count: idle,
            busy_count: 0,
            capacity: 2,
        };
        let stats = PoolStats {
            global: GlobalStats::default(),
            pools: vec![mk("a", 2), mk("b", 0)],
        };
        assert!((stats.average_utilization() - 0.5).abs() < f64::EPSILON);
        assert_eq!(PoolStats::default().average_utilization(), 0.0);
    }
}
