//! Anthropic Claude LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the Anthropic
//! Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{endpoint, http_client};
use crate::domain::model::ModelConfig;
use crate::error::{Error, FactoryError, Result};
use crate::port::outbound::llm::Llm;

/// Messages path relative to the base URL.
const MESSAGES_PATH: &str = "messages";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens`; used when the config leaves it unset.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Claude API client.
pub struct Anthropic {
    client: Client,
    url: String,
    api_key: String,
    /// Model identifier (e.g., "claude-sonnet-4-6").
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl Anthropic {
    /// Create a client for one model slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ModelConfig) -> std::result::Result<Self, FactoryError> {
        Ok(Self {
            client: http_client(config.request_timeout_secs)?,
            url: endpoint(&config.base_url, MESSAGES_PATH),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            // Anthropic caps temperature at 1.0.
            temperature: config.temperature.min(1.0),
        })
    }

    fn request(&self, prompt: &str) -> Request {
        Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        }
    }
}

impl std::fmt::Debug for Anthropic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anthropic")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Llm for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&self.request(prompt))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        Ok(response
            .content
            .into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
