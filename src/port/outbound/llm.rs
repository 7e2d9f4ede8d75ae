//! LLM completion port.
//!
//! Defines the client handle the pool manages. Handles are expensive to
//! construct (HTTP client, TLS configuration) and cheap to reuse.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific LLM providers (OpenAI, Anthropic, etc.) and
/// handle authentication and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`): a checked-out handle
/// is shared as `Arc<dyn Llm>` between the registry and the borrowing caller.
///
/// # Errors
///
/// The [`complete`](Self::complete) method returns an error for API failures,
/// rate limits, or invalid responses. The pool never retries them.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Model identifier this handle was built for.
    fn model(&self) -> &str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
