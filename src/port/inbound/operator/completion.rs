//! One-shot completion through the pool.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,
    pub consumer: String,
    /// `primary`, `model_a` or `model_b`.
    pub role: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponse {
    /// Pool key the client was leased from.
    pub key: String,
    pub model: String,
    pub text: String,
}

/// Completion use-cases for operator-facing adapters.
#[async_trait]
pub trait CompletionOperator: Send + Sync {
    /// Lease a client for the consumer's slot, send `prompt`, release.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
