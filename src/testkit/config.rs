//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::application::pool::config::PoolConfig;
use crate::domain::id::ConsumerId;
use crate::domain::key::PoolKey;
use crate::domain::model::{ConsumerConfig, ModelConfig, Provider};

/// Pool settings with the given capacity and a 60 s idle limit.
pub fn pool(size_per_key: usize) -> PoolConfig {
    PoolConfig {
        size_per_key,
        max_idle_secs: 60,
        reap_interval_secs: 1,
        max_lifetime_secs: 0,
    }
}

/// OpenAI model config for `model` with a dummy key.
pub fn model(model: &str) -> ModelConfig {
    ModelConfig::new(Provider::OpenAi, model, "sk-test")
}

pub fn single(model_name: &str) -> ConsumerConfig {
    ConsumerConfig::Single(model(model_name))
}

pub fn dual(model_a: &str, model_b: &str) -> ConsumerConfig {
    ConsumerConfig::Dual {
        model_a: model(model_a),
        model_b: model(model_b),
    }
}

/// Primary key of consumer `id`.
pub fn key(id: &str) -> PoolKey {
    PoolKey::primary(ConsumerId::new(id))
}
