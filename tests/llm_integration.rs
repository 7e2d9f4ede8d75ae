//! Integration tests for pooled LLM clients against real providers.
//!
//! These tests require real API keys and network access to run. They are
//! gated behind the `integration-tests` feature and marked `#[ignore]`.
//!
//! ```bash
//! export OPENAI_API_KEY="..."
//! export ANTHROPIC_API_KEY="..."
//! cargo test --features integration-tests -- --ignored
//! ```
//!
//! Each test uses a cheap model and a short prompt, but still incurs small
//! charges.

#![cfg(feature = "integration-tests")]

use std::sync::Arc;
use std::time::Duration;

use warmpool::adapter::outbound::llm::factory::LlmClientFactory;
use warmpool::application::pool::config::PoolConfig;
use warmpool::application::pool::registry::{ConnectionRegistry, ReleaseOutcome};
use warmpool::domain::id::ConsumerId;
use warmpool::domain::key::PoolKey;
use warmpool::domain::model::{ModelConfig, Provider};
use warmpool::port::outbound::llm::Llm;

fn model_from_env(provider: Provider, var: &str, model: &str) -> Option<ModelConfig> {
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Some(ModelConfig::new(provider, model, key).with_max_tokens(32)),
        _ => {
            eprintln!("Skipping {provider} test: {var} not set");
            None
        }
    }
}

fn registry() -> Arc<ConnectionRegistry> {
    let config = PoolConfig {
        size_per_key: 2,
        ..PoolConfig::default()
    };
    Arc::new(
        ConnectionRegistry::with_system_clock(config, LlmClientFactory::new().into_client_factory())
            .unwrap(),
    )
}

async fn ping_through_pool(model: ModelConfig) {
    let registry = registry();
    let key = PoolKey::primary(ConsumerId::new("integration"));
    registry.prewarm_key(&key, &model).unwrap();

    for _ in 0..2 {
        let lease = registry.acquire(&key, &model).unwrap();
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            lease.client().complete("Respond with exactly: PONG"),
        )
        .await
        .expect("Request timed out");
        let outcome = registry.release(lease.id());

        let text = result.expect("API call failed");
        assert!(text.contains("PONG"), "Expected 'PONG' in response: {text}");
        assert_eq!(outcome, ReleaseOutcome::Returned);
    }

    let stats = registry.stats();
    assert_eq!(stats.global.total_created, 2);
    assert_eq!(stats.global.total_reused, 2);
    registry.shutdown();
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn openai_completion_through_pool() {
    let Some(model) = model_from_env(Provider::OpenAi, "OPENAI_API_KEY", "gpt-4o-mini") else {
        return;
    };
    ping_through_pool(model).await;
}

#[tokio::test]
#[ignore = "requires ANTHROPIC_API_KEY and network access"]
async fn anthropic_completion_through_pool() {
    let Some(model) =
        model_from_env(Provider::Anthropic, "ANTHROPIC_API_KEY", "claude-haiku-4-5")
    else {
        return;
    };
    ping_through_pool(model).await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn bad_credential_surfaces_on_complete() {
    let model = ModelConfig::new(Provider::OpenAi, "gpt-4o-mini", "sk-invalid");
    let registry = registry();
    let key = PoolKey::primary(ConsumerId::new("integration"));

    // Construction never touches the network; the failure shows up on use.
    let lease = registry.acquire(&key, &model).unwrap();
    let result = lease.client().complete("ping").await;
    registry.release(lease.id());

    assert!(result.is_err());
    registry.assert_consistent();
}
