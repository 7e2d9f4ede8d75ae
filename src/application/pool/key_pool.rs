//! Bounded idle queue for one key.

use std::collections::VecDeque;

use super::connection::Connection;
use crate::domain::key::PoolKey;

/// Idle connections for a single key, oldest first.
///
/// Nothing here blocks. `capacity` bounds the idle reserve only; busy
/// connections live in the registry's active map.
#[derive(Debug)]
pub(crate) struct KeyPool {
    key: PoolKey,
    idle: VecDeque<Connection>,
    capacity: usize,
}

impl KeyPool {
    pub(crate) fn new(key: PoolKey, capacity: usize) -> Self {
        Self {
            key,
            idle: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn key(&self) -> &PoolKey {
        &self.key
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.idle.len()
    }

    pub(crate) fn try_take(&mut self) -> Option<Connection> {
        self.idle.pop_front()
    }

    /// Enqueue an idle connection, or hand it back when full.
    pub(crate) fn try_put(&mut self, conn: Connection) -> Result<(), Connection> {
        if self.idle.len() >= self.capacity {
            return Err(conn);
        }
        self.idle.push_back(conn);
        Ok(())
    }

    /// Remove every idle connection, preserving order.
    pub(crate) fn drain(&mut self) -> Vec<Connection> {
        self.idle.drain(..).collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.idle.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::domain::id::ConsumerId;
    use crate::testkit::llm::MockLlm;

    fn key() -> PoolKey {
        PoolKey::primary(ConsumerId::new("1"))
    }

    fn conn() -> Connection {
        Connection::new(key(), Arc::new(MockLlm::new("m")), Utc::now())
    }

    #[test]
    fn put_rejects_when_full() {
        let mut pool = KeyPool::new(key(), 1);
        assert!(pool.try_put(conn()).is_ok());

        let extra = conn();
        let extra_id = extra.id().clone();
        let rejected = pool.try_put(extra).unwrap_err();
        assert_eq!(rejected.id(), &extra_id);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn take_is_fifo() {
        let mut pool = KeyPool::new(key(), 3);
        let a = conn();
        let b = conn();
        let a_id = a.id().clone();
        let b_id = b.id().clone();
        pool.try_put(a).unwrap();
        pool.try_put(b).unwrap();

        assert_eq!(pool.try_take().unwrap().id(), &a_id);
        assert_eq!(pool.try_take().unwrap().id(), &b_id);
        assert!(pool.try_take().is_none());
    }

    #[test]
    fn drain_empties_queue() {
        let mut pool = KeyPool::new(key(), 2);
        pool.try_put(conn()).unwrap();
        pool.try_put(conn()).unwrap();

        assert_eq!(pool.drain().len(), 2);
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.capacity(), 2);
    }
}
