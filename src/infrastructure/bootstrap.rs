//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::adapter::outbound::llm::factory::LlmClientFactory;
use crate::application::pool::registry::ConnectionRegistry;
use crate::domain::id::ConsumerId;
use crate::domain::model::ConsumerConfig;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Outcome of prewarming every configured consumer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StartupSummary {
    /// Consumers whose pools were built.
    pub consumers: usize,
    /// Connections created across all pools.
    pub connections: usize,
    /// Consumers skipped because their config did not resolve or validate.
    pub skipped: Vec<String>,
}

/// Build the registry with the production client factory.
///
/// # Errors
///
/// Returns an error if the pool configuration is invalid.
pub fn build_registry(config: &Config) -> Result<Arc<ConnectionRegistry>> {
    let factory = LlmClientFactory::new().into_client_factory();
    let registry = ConnectionRegistry::with_system_clock(config.pool.clone(), factory)?;
    info!(
        size_per_key = config.pool.size_per_key,
        max_idle_secs = config.pool.max_idle_secs,
        "Connection registry initialized"
    );
    Ok(Arc::new(registry))
}

/// Resolve every consumer, logging and skipping the ones that fail.
pub fn resolve_consumers(config: &Config) -> (Vec<(ConsumerId, ConsumerConfig)>, Vec<String>) {
    let mut resolved = Vec::with_capacity(config.consumers.len());
    let mut skipped = Vec::new();

    for settings in &config.consumers {
        match settings.resolve() {
            Ok(consumer) => resolved.push((settings.consumer_id(), consumer)),
            Err(e) => {
                error!(consumer = %settings.id, error = %e, "Consumer config invalid, skipping");
                skipped.push(settings.id.clone());
            }
        }
    }
    (resolved, skipped)
}

/// Prewarm every configured consumer.
///
/// A consumer that fails is logged and skipped; the rest still come up.
pub fn prewarm_consumers(registry: &ConnectionRegistry, config: &Config) -> StartupSummary {
    let (consumers, mut skipped) = resolve_consumers(config);
    let mut summary = StartupSummary::default();

    for (id, consumer) in &consumers {
        match registry.prewarm(id, consumer) {
            Ok(reports) => {
                summary.consumers += 1;
                summary.connections += reports.iter().map(|r| r.created).sum::<usize>();
            }
            Err(e) => {
                warn!(consumer = %id, error = %e, "Prewarm failed");
                skipped.push(id.to_string());
            }
        }
    }

    summary.skipped = skipped;
    info!(
        consumers = summary.consumers,
        connections = summary.connections,
        skipped = summary.skipped.len(),
        "Startup prewarm complete"
    );
    summary
}
