//! Registry internal state.
//!
//! Everything here lives behind the registry's single mutex. Helpers are
//! free functions over individual fields so callers can hold disjoint
//! borrows of the state at once.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use super::config_cache::ConfigCache;
use super::connection::Connection;
use super::key_pool::KeyPool;
use crate::domain::id::ConnectionId;
use crate::domain::key::PoolKey;

/// Monotonic counters. `current_*` figures are derived, not stored.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Counters {
    pub(super) created: u64,
    pub(super) reused: u64,
    pub(super) released: u64,
    pub(super) recycled: u64,
}

/// Why a connection was disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecycleReason {
    /// A tracked config field changed between acquires.
    ConfigDrift,
    /// Explicit clear of a consumer or of all pools.
    Cleared,
    /// Idle longer than the configured limit.
    IdleTimeout,
    /// Older than the configured lifetime on release.
    Expired,
    /// Released into a key with no pool.
    PoolMissing,
    /// Released into a pool already at capacity.
    PoolFull,
    Shutdown,
}

impl fmt::Display for RecycleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConfigDrift => "config_drift",
            Self::Cleared => "cleared",
            Self::IdleTimeout => "idle_timeout",
            Self::Expired => "expired",
            Self::PoolMissing => "pool_missing",
            Self::PoolFull => "pool_full",
            Self::Shutdown => "shutdown",
        };
        f.write_str(s)
    }
}

pub(super) struct RegistryState {
    /// Ordered so stats come out sorted by key.
    pub(super) pools: BTreeMap<PoolKey, KeyPool>,
    pub(super) active: HashMap<ConnectionId, Connection>,
    pub(super) configs: ConfigCache,
    pub(super) counters: Counters,
    pub(super) closed: bool,
}

impl RegistryState {
    pub(super) fn new() -> Self {
        Self {
            pools: BTreeMap::new(),
            active: HashMap::new(),
            configs: ConfigCache::default(),
            counters: Counters::default(),
            closed: false,
        }
    }

    pub(super) fn idle_total(&self) -> usize {
        self.pools.values().map(KeyPool::len).sum()
    }

    pub(super) fn busy_for(&self, key: &PoolKey) -> usize {
        self.active.values().filter(|c| c.key() == key).count()
    }

    /// Recycle the idle queue and every busy connection of `key`.
    ///
    /// The pool entry is removed; the config cache is left to the caller.
    pub(super) fn clear_key(&mut self, key: &PoolKey, reason: RecycleReason) -> usize {
        let mut n = 0;
        if let Some(mut pool) = self.pools.remove(key) {
            for conn in pool.drain() {
                recycle(&mut self.counters, conn, reason);
                n += 1;
            }
        }

        let busy: Vec<ConnectionId> = self
            .active
            .iter()
            .filter(|(_, c)| c.key() == key)
            .map(|(id, _)| id.clone())
            .collect();
        for id in busy {
            if let Some(conn) = self.active.remove(&id) {
                recycle(&mut self.counters, conn, reason);
                n += 1;
            }
        }
        n
    }

    /// Recycle everything. Returns `(pools, connections)` removed.
    pub(super) fn clear_everything(&mut self, reason: RecycleReason) -> (usize, usize) {
        let pools = self.pools.len();
        let mut n = 0;

        for (_, mut pool) in std::mem::take(&mut self.pools) {
            for conn in pool.drain() {
                recycle(&mut self.counters, conn, reason);
                n += 1;
            }
        }
        for (_, conn) in self.active.drain() {
            recycle(&mut self.counters, conn, reason);
            n += 1;
        }
        self.configs.clear();
        (pools, n)
    }
}

/// Dispose of a connection. Dropping it releases the registry's reference
/// to the client handle; a caller still holding a lease keeps its own.
pub(super) fn recycle(counters: &mut Counters, conn: Connection, reason: RecycleReason) {
    counters.recycled += 1;
    debug!(
        connection_id = %conn.id(),
        key = %conn.key(),
        reason = %reason,
        "Connection recycled"
    );
}
