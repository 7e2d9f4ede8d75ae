//! Provider-dispatching client factory.

use std::sync::Arc;

use tracing::debug;

use super::anthropic::Anthropic;
use super::openai::OpenAi;
use crate::domain::model::{ModelConfig, Provider};
use crate::error::FactoryError;
use crate::port::outbound::factory::ClientFactory;
use crate::port::outbound::llm::Llm;

/// Builds [`Llm`] handles from model configs.
///
/// Construction is local only (an HTTP client plus the request template), so
/// it is safe to call while the registry lock is held.
#[derive(Debug, Default, Clone, Copy)]
pub struct LlmClientFactory;

impl LlmClientFactory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build one handle for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn build(&self, config: &ModelConfig) -> Result<Arc<dyn Llm>, FactoryError> {
        let client: Arc<dyn Llm> = match config.provider {
            Provider::OpenAi => Arc::new(OpenAi::from_config(config)?),
            Provider::Anthropic => Arc::new(Anthropic::from_config(config)?),
        };
        debug!(provider = %config.provider, model = %config.model, "Built LLM client");
        Ok(client)
    }

    /// Erase into the closure type the registry consumes.
    #[must_use]
    pub fn into_client_factory(self) -> ClientFactory {
        Arc::new(move |config: &ModelConfig| self.build(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_provider() {
        let factory = LlmClientFactory::new();

        let openai = factory
            .build(&ModelConfig::new(Provider::OpenAi, "gpt-4o-mini", "k"))
            .unwrap();
        assert_eq!(openai.name(), "openai");

        let anthropic = factory
            .build(&ModelConfig::new(Provider::Anthropic, "claude-haiku-4-5", "k"))
            .unwrap();
        assert_eq!(anthropic.name(), "anthropic");
        assert_eq!(anthropic.model(), "claude-haiku-4-5");
    }

    #[test]
    fn erased_factory_builds_clients() {
        let factory = LlmClientFactory::new().into_client_factory();
        let client = factory(&ModelConfig::new(Provider::OpenAi, "gpt-4o", "k")).unwrap();
        assert_eq!(client.model(), "gpt-4o");
    }
}
