//! Last-known tracked configuration per key.

use std::collections::HashMap;

use crate::domain::key::PoolKey;
use crate::domain::model::{ConfigSnapshot, ModelConfig, TrackedField};

#[derive(Debug, Default)]
pub(crate) struct ConfigCache {
    entries: HashMap<PoolKey, ConfigSnapshot>,
}

impl ConfigCache {
    /// First tracked field of `config` that differs from the cached entry.
    ///
    /// A key with no entry never drifts.
    pub(crate) fn drift(&self, key: &PoolKey, config: &ModelConfig) -> Option<TrackedField> {
        self.entries.get(key).and_then(|snap| snap.drift(config))
    }

    pub(crate) fn store(&mut self, key: PoolKey, config: &ModelConfig) {
        self.entries.insert(key, config.snapshot());
    }

    pub(crate) fn remove(&mut self, key: &PoolKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(any(test, feature = "testkit"))]
    pub(crate) fn contains(&self, key: &PoolKey) -> bool {
        self.entries.contains_key(key)
    }
}
