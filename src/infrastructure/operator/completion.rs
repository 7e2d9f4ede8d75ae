//! Completion operator implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::key::{ModelRole, PoolKey};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::build_registry;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::completion::{
    CompletionOperator, CompletionRequest, CompletionResponse,
};

use super::entry::Operator;

#[async_trait]
impl CompletionOperator for Operator {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let config = Config::parse_toml(&request.config_toml)?;
        let role: ModelRole = request
            .role
            .parse()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "role",
                reason,
            })?;

        let settings =
            config
                .consumer(&request.consumer)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "consumer",
                    reason: format!("no consumer '{}' configured", request.consumer),
                })?;
        let consumer = settings.resolve()?;
        let model = consumer
            .model(role)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "role",
                reason: format!(
                    "consumer '{}' is {} and has no {role} model",
                    settings.id,
                    consumer.kind()
                ),
            })?;

        let registry = build_registry(&config)?;
        let key = PoolKey::new(settings.consumer_id(), role);
        let lease = registry.acquire(&key, model)?;
        debug!(key = %key, connection = %lease.id(), "Leased client for completion");

        let result = lease.client().complete(&request.prompt).await;
        registry.release(lease.id());
        registry.shutdown();

        Ok(CompletionResponse {
            key: key.to_string(),
            model: lease.client().model().to_string(),
            text: result?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[[consumers]]
id = "42"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk"
"#;

    fn request(consumer: &str, role: &str) -> CompletionRequest {
        CompletionRequest {
            config_toml: CONFIG.to_string(),
            consumer: consumer.to_string(),
            role: role.to_string(),
            prompt: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_consumer_is_rejected() {
        let err = Operator.complete(request("7", "primary")).await.unwrap_err();
        assert!(err.to_string().contains("no consumer '7'"));
    }

    #[tokio::test]
    async fn missing_role_is_rejected() {
        let err = Operator.complete(request("42", "model_b")).await.unwrap_err();
        assert!(err.to_string().contains("has no model_b model"));
    }

    #[tokio::test]
    async fn bad_role_is_rejected() {
        let err = Operator.complete(request("42", "judge")).await.unwrap_err();
        assert!(err.to_string().contains("unknown model role"));
    }
}
