//! A pooled client handle and its bookkeeping.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::id::ConnectionId;
use crate::domain::key::PoolKey;
use crate::port::outbound::llm::Llm;

/// One constructed client handle owned by the registry.
///
/// A live connection is either in its key's idle queue or in the registry's
/// active map, never both. Callers never hold a `Connection`; they hold a
/// [`Lease`].
pub(crate) struct Connection {
    id: ConnectionId,
    key: PoolKey,
    client: Arc<dyn Llm>,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
    usage_count: u64,
    busy: bool,
}

impl Connection {
    pub(crate) fn new(key: PoolKey, client: Arc<dyn Llm>, now: DateTime<Utc>) -> Self {
        Self {
            id: ConnectionId::generate(&key),
            key,
            client,
            created_at: now,
            last_used_at: now,
            usage_count: 0,
            busy: false,
        }
    }

    pub(crate) fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub(crate) fn key(&self) -> &PoolKey {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn last_used_at(&self) -> DateTime<Utc> {
        self.last_used_at
    }

    #[cfg(any(test, feature = "testkit"))]
    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    /// Idle -> Busy (or fresh -> Busy).
    pub(crate) fn check_out(&mut self, now: DateTime<Utc>) {
        self.busy = true;
        self.usage_count += 1;
        self.last_used_at = now;
    }

    /// Busy -> Idle.
    pub(crate) fn check_in(&mut self, now: DateTime<Utc>) {
        self.busy = false;
        self.last_used_at = now;
    }

    pub(crate) fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_used_at
    }

    pub(crate) fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    pub(crate) fn lease(&self) -> Lease {
        Lease {
            id: self.id.clone(),
            key: self.key.clone(),
            client: Arc::clone(&self.client),
            usage_count: self.usage_count,
        }
    }

    pub(crate) fn info(&self) -> ConnectionInfo {
        ConnectionInfo {
            id: self.id.clone(),
            key: self.key.clone(),
            model: self.client.model().to_string(),
            created_at: self.created_at,
            last_used_at: self.last_used_at,
            usage_count: self.usage_count,
            busy: self.busy,
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("client", &self.client.name())
            .field("created_at", &self.created_at)
            .field("last_used_at", &self.last_used_at)
            .field("usage_count", &self.usage_count)
            .field("busy", &self.busy)
            .finish()
    }
}

/// A checked-out connection as seen by the caller.
///
/// Use [`client`](Self::client) outside any pool lock and hand
/// [`id`](Self::id) back to `release` exactly once, on error paths too.
#[derive(Clone)]
pub struct Lease {
    id: ConnectionId,
    key: PoolKey,
    client: Arc<dyn Llm>,
    usage_count: u64,
}

impl Lease {
    #[must_use]
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    #[must_use]
    pub fn key(&self) -> &PoolKey {
        &self.key
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn Llm> {
        &self.client
    }

    /// How many times this connection has been checked out, this one included.
    #[must_use]
    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }
}

impl fmt::Debug for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("client", &self.client.name())
            .field("usage_count", &self.usage_count)
            .finish()
    }
}

/// Read-only view of one connection, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    pub id: ConnectionId,
    pub key: PoolKey,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub usage_count: u64,
    pub busy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ConsumerId;
    use crate::testkit::llm::MockLlm;

    fn conn(now: DateTime<Utc>) -> Connection {
        Connection::new(
            PoolKey::primary(ConsumerId::new("1")),
            Arc::new(MockLlm::new("gpt-test")),
            now,
        )
    }

    #[test]
    fn check_out_counts_usage_and_stamps() {
        let t0 = Utc::now();
        let mut c = conn(t0);
        assert_eq!(c.lease().usage_count(), 0);

        let t1 = t0 + Duration::seconds(5);
        c.check_out(t1);
        assert!(c.is_busy());
        assert_eq!(c.last_used_at(), t1);
        assert_eq!(c.lease().usage_count(), 1);
    }

    #[test]
    fn check_in_marks_idle() {
        let t0 = Utc::now();
        let mut c = conn(t0);
        c.check_out(t0);
        c.check_in(t0 + Duration::seconds(3));

        assert!(!c.is_busy());
        assert_eq!(c.idle_for(t0 + Duration::seconds(10)), Duration::seconds(7));
        assert_eq!(c.age(t0 + Duration::seconds(10)), Duration::seconds(10));
    }

    #[test]
    fn lease_shares_client() {
        let c = conn(Utc::now());
        let lease = c.lease();
        assert_eq!(lease.id(), c.id());
        assert_eq!(lease.client().model(), "gpt-test");
        assert_eq!(c.info().model, "gpt-test");
    }
}
