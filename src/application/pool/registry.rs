//! The [`ConnectionRegistry`] and its operations.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::domain::id::{ConnectionId, ConsumerId};
use crate::domain::key::{ConsumerKind, PoolKey};
use crate::domain::model::{ConsumerConfig, ModelConfig};
use crate::domain::stats::{GlobalStats, KeyPoolStats, PoolStats};
use crate::error::{PoolError, Result};
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::factory::ClientFactory;

use super::config::PoolConfig;
use super::connection::{Connection, ConnectionInfo, Lease};
use super::key_pool::KeyPool;
use super::state::{recycle, RecycleReason, RegistryState};

/// What happened to a released connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Back in its key's idle queue.
    Returned,
    /// Disposed of: the pool was missing or full, or the connection expired.
    Recycled,
    /// The id was not checked out. Nothing changed.
    Unknown,
}

/// Result of prewarming one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrewarmReport {
    pub key: PoolKey,
    /// Connections built and enqueued.
    pub created: usize,
    /// Slots skipped because the factory failed.
    pub failed: usize,
    /// The pool already existed; nothing was built.
    pub already_warm: bool,
}

/// Totals removed by a bulk clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearSummary {
    pub pools: usize,
    pub connections: usize,
}

/// Registry of per-key connection pools.
///
/// Construct once at startup, share as `Arc`, and call
/// [`shutdown`](Self::shutdown) at teardown.
pub struct ConnectionRegistry {
    config: PoolConfig,
    factory: ClientFactory,
    clock: Arc<dyn Clock>,
    state: Mutex<RegistryState>,
    closed_tx: watch::Sender<bool>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool configuration is invalid.
    #[must_use = "returns Result that must be checked"]
    pub fn new(config: PoolConfig, factory: ClientFactory, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let (closed_tx, _) = watch::channel(false);
        Ok(Self {
            config,
            factory,
            clock,
            state: Mutex::new(RegistryState::new()),
            closed_tx,
        })
    }

    /// Create a registry driven by the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool configuration is invalid.
    pub fn with_system_clock(config: PoolConfig, factory: ClientFactory) -> Result<Self> {
        Self::new(config, factory, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Build the pool for `key` unless it already exists.
    ///
    /// Individual factory failures are logged and the slot is skipped, so a
    /// pool may come up short (or empty). An existing pool is left exactly
    /// as it is, config cache included.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ConfigInvalid`] if `config` fails validation
    /// - [`PoolError::PoolUnavailable`] after shutdown
    pub fn prewarm_key(
        &self,
        key: &PoolKey,
        config: &ModelConfig,
    ) -> std::result::Result<PrewarmReport, PoolError> {
        config.validate()?;
        let now = self.clock.now();

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.closed {
            return Err(unavailable(key, "registry is shut down"));
        }
        if state.pools.contains_key(key) {
            return Ok(PrewarmReport {
                key: key.clone(),
                created: 0,
                failed: 0,
                already_warm: true,
            });
        }
        Ok(self.build_pool(state, key, config, now))
    }

    /// Prewarm every key owned by `consumer`.
    ///
    /// All model configs are validated before anything is built.
    ///
    /// # Errors
    ///
    /// Same as [`prewarm_key`](Self::prewarm_key).
    pub fn prewarm(
        &self,
        consumer: &ConsumerId,
        config: &ConsumerConfig,
    ) -> std::result::Result<Vec<PrewarmReport>, PoolError> {
        let models = config.models();
        for (_, model) in &models {
            model.validate()?;
        }

        let mut reports = Vec::with_capacity(models.len());
        for (role, model) in models {
            let key = PoolKey::new(consumer.clone(), role);
            reports.push(self.prewarm_key(&key, model)?);
        }
        Ok(reports)
    }

    /// Check out a connection for `key`.
    ///
    /// Never blocks: an empty idle queue yields a fresh temporary connection.
    ///
    /// # Errors
    ///
    /// - [`PoolError::ConfigInvalid`] if `config` fails validation (the pool
    ///   is untouched)
    /// - [`PoolError::Factory`] if a temporary connection could not be built
    /// - [`PoolError::PoolUnavailable`] after shutdown, or when the key holds
    ///   no connections at all and construction failed
    pub fn acquire(
        &self,
        key: &PoolKey,
        config: &ModelConfig,
    ) -> std::result::Result<Lease, PoolError> {
        config.validate()?;
        let now = self.clock.now();

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.closed {
            return Err(unavailable(key, "registry is shut down"));
        }

        if let Some(field) = state.configs.drift(key, config) {
            let recycled = state.clear_key(key, RecycleReason::ConfigDrift);
            state.configs.remove(key);
            info!(key = %key, field = %field, recycled, "Config drift, rebuilding pool");
        }

        if !state.pools.contains_key(key) {
            self.build_pool(state, key, config, now);
        }

        if let Some(mut conn) = state.pools.get_mut(key).and_then(KeyPool::try_take) {
            conn.check_out(now);
            state.counters.reused += 1;
            let lease = conn.lease();
            state.active.insert(conn.id().clone(), conn);
            return Ok(lease);
        }

        match (self.factory)(config) {
            Ok(client) => {
                let mut conn = Connection::new(key.clone(), client, now);
                conn.check_out(now);
                state.counters.created += 1;
                let lease = conn.lease();
                info!(
                    key = %key,
                    connection_id = %conn.id(),
                    "Pool exhausted, created temporary connection"
                );
                state.active.insert(conn.id().clone(), conn);
                Ok(lease)
            }
            Err(source) => {
                error!(key = %key, error = %source, "Failed to create connection");
                if state.busy_for(key) == 0 {
                    Err(unavailable(
                        key,
                        format!("no connections could be created: {source}"),
                    ))
                } else {
                    Err(PoolError::Factory {
                        key: key.clone(),
                        source,
                    })
                }
            }
        }
    }

    /// Return a checked-out connection.
    ///
    /// Unknown ids are logged and ignored. A connection whose pool is gone
    /// or full, or which outlived `max_lifetime_secs`, is recycled.
    pub fn release(&self, id: &ConnectionId) -> ReleaseOutcome {
        let now = self.clock.now();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(mut conn) = state.active.remove(id) else {
            warn!(connection_id = %id, "Release of unknown connection");
            return ReleaseOutcome::Unknown;
        };
        conn.check_in(now);

        if let Some(max) = self.config.max_lifetime() {
            if conn.age(now) > max {
                recycle(&mut state.counters, conn, RecycleReason::Expired);
                return ReleaseOutcome::Recycled;
            }
        }

        let Some(pool) = state.pools.get_mut(conn.key()) else {
            recycle(&mut state.counters, conn, RecycleReason::PoolMissing);
            return ReleaseOutcome::Recycled;
        };
        match pool.try_put(conn) {
            Ok(()) => {
                state.counters.released += 1;
                ReleaseOutcome::Returned
            }
            Err(conn) => {
                recycle(&mut state.counters, conn, RecycleReason::PoolFull);
                ReleaseOutcome::Recycled
            }
        }
    }

    /// Recycle every connection of `consumer` and forget its configs.
    ///
    /// Busy connections are recycled too; their holders keep a working
    /// client until they release, which then reports `Unknown`.
    pub fn clear_connections(&self, consumer: &ConsumerId, kind: ConsumerKind) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut total = 0;
        for key in PoolKey::for_consumer(consumer, kind) {
            total += state.clear_key(&key, RecycleReason::Cleared);
            state.configs.remove(&key);
        }
        info!(consumer = %consumer, kind = %kind, recycled = total, "Cleared consumer connections");
        total
    }

    /// Drain every pool. The registry stays usable.
    pub fn clear_all(&self) -> ClearSummary {
        let (pools, connections) = self.state.lock().clear_everything(RecycleReason::Cleared);
        info!(pools, connections, "Cleared all pools");
        ClearSummary { pools, connections }
    }

    /// Recycle everything and close the registry.
    ///
    /// Later acquires and prewarms fail with `PoolUnavailable`, and any
    /// running [`Reaper`](super::reaper::Reaper) stops. Calling it twice is harmless.
    pub fn shutdown(&self) -> ClearSummary {
        let summary = {
            let mut guard = self.state.lock();
            if guard.closed {
                return ClearSummary::default();
            }
            let (pools, connections) = guard.clear_everything(RecycleReason::Shutdown);
            guard.closed = true;
            ClearSummary { pools, connections }
        };
        self.closed_tx.send_replace(true);
        info!(
            pools = summary.pools,
            connections = summary.connections,
            "Connection registry shut down"
        );
        summary
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) fn subscribe_closed(&self) -> watch::Receiver<bool> {
        self.closed_tx.subscribe()
    }

    /// Recycle idle connections unused for longer than `max_idle_secs`.
    ///
    /// Survivors keep their order and fields. Busy connections are never
    /// touched. Returns the number recycled.
    pub fn reap_idle(&self) -> usize {
        let now = self.clock.now();
        let max_idle = self.config.max_idle();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut reaped = 0;
        for pool in state.pools.values_mut() {
            for conn in pool.drain() {
                if conn.idle_for(now) > max_idle {
                    recycle(&mut state.counters, conn, RecycleReason::IdleTimeout);
                    reaped += 1;
                } else if let Err(conn) = pool.try_put(conn) {
                    recycle(&mut state.counters, conn, RecycleReason::PoolFull);
                }
            }
        }

        if reaped > 0 {
            info!(
                reaped,
                remaining_idle = state.idle_total(),
                "Recycled idle connections"
            );
        }
        reaped
    }

    /// Snapshot of global counters and per-key detail.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();

        let pools = state
            .pools
            .values()
            .map(|pool| KeyPoolStats {
                key: pool.key().clone(),
                idle_count: pool.len(),
                busy_count: state.busy_for(pool.key()),
                capacity: pool.capacity(),
            })
            .collect();

        PoolStats {
            global: GlobalStats {
                total_created: state.counters.created,
                total_reused: state.counters.reused,
                total_released: state.counters.released,
                total_recycled: state.counters.recycled,
                current_active: state.active.len(),
                current_idle: state.idle_total(),
            },
            pools,
        }
    }

    /// Idle then busy connections of `key`.
    #[must_use]
    pub fn inspect(&self, key: &PoolKey) -> Vec<ConnectionInfo> {
        let state = self.state.lock();

        let idle = state
            .pools
            .get(key)
            .into_iter()
            .flat_map(KeyPool::iter)
            .map(Connection::info);
        let busy = state
            .active
            .values()
            .filter(|c| c.key() == key)
            .map(Connection::info);
        idle.chain(busy).collect()
    }

    /// Panic if any structural invariant is violated.
    #[cfg(any(test, feature = "testkit"))]
    pub fn assert_consistent(&self) {
        let state = self.state.lock();

        for (key, pool) in &state.pools {
            assert_eq!(pool.key(), key, "pool stored under wrong key");
            assert!(pool.len() <= pool.capacity(), "{key}: idle exceeds capacity");
            assert!(state.configs.contains(key), "{key}: pool without cached config");
            for conn in pool.iter() {
                assert!(!conn.is_busy(), "{}: busy connection in idle queue", conn.id());
                assert_eq!(conn.key(), key, "{}: queued under wrong key", conn.id());
                assert!(
                    !state.active.contains_key(conn.id()),
                    "{}: both idle and active",
                    conn.id()
                );
            }
        }
        for (id, conn) in &state.active {
            assert!(conn.is_busy(), "{id}: idle connection in active map");
        }

        let live = (state.active.len() + state.idle_total()) as u64;
        assert_eq!(
            state.counters.created - state.counters.recycled,
            live,
            "created - recycled != active + idle"
        );
    }

    fn build_pool(
        &self,
        state: &mut RegistryState,
        key: &PoolKey,
        config: &ModelConfig,
        now: chrono::DateTime<chrono::Utc>,
    ) -> PrewarmReport {
        let mut pool = KeyPool::new(key.clone(), self.config.size_per_key);
        let mut failed = 0;

        for _ in 0..pool.capacity() {
            match (self.factory)(config) {
                Ok(client) => {
                    state.counters.created += 1;
                    if let Err(conn) = pool.try_put(Connection::new(key.clone(), client, now)) {
                        recycle(&mut state.counters, conn, RecycleReason::PoolFull);
                    }
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to prewarm connection");
                    failed += 1;
                }
            }
        }

        let created = pool.len();
        if created == 0 {
            error!(key = %key, "Prewarm produced no connections");
        } else {
            info!(key = %key, created, failed, "Pool prewarmed");
        }

        state.pools.insert(key.clone(), pool);
        state.configs.store(key.clone(), config);

        PrewarmReport {
            key: key.clone(),
            created,
            failed,
            already_warm: false,
        }
    }
}

fn unavailable(key: &PoolKey, reason: impl Into<String>) -> PoolError {
    PoolError::PoolUnavailable {
        key: key.clone(),
        reason: reason.into(),
    }
}
