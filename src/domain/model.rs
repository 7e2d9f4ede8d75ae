//! Model slot configuration and drift detection.
//!
//! A [`ModelConfig`] is everything needed to construct one client handle.
//! Only a fixed subset of its fields is tracked for drift: changing any of
//! them invalidates the pool built from the previous values. The tracked
//! subset is captured in a [`ConfigSnapshot`].

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::key::{ConsumerKind, ModelRole};
use crate::error::PoolError;

/// LLM provider API flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI-compatible Chat Completions API.
    #[default]
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl Provider {
    /// Base URL used when the config does not name one.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Configuration of a single model slot.
#[derive(Clone, PartialEq)]
pub struct ModelConfig {
    pub provider: Provider,
    /// Model identifier (e.g. "gpt-4o-mini").
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    /// Sampling temperature (0.0 to 2.0).
    pub temperature: f64,
    /// Output-size limit. `None` leaves it to the provider default.
    pub max_tokens: Option<u32>,
    /// Per-request timeout. Not tracked for drift.
    pub request_timeout_secs: Option<u64>,
}

impl ModelConfig {
    /// Create a config with provider defaults for everything but the model
    /// and credential.
    pub fn new(provider: Provider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            request_timeout_secs: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Check required fields before any client construction is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ConfigInvalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.model.trim().is_empty() {
            return Err(PoolError::invalid("model", "must not be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(PoolError::invalid("api_key", "must not be empty"));
        }
        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(PoolError::invalid(
                    "base_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                ))
            }
            Err(e) => return Err(PoolError::invalid("base_url", e.to_string())),
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(PoolError::invalid(
                "temperature",
                "must be between 0.0 and 2.0",
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(PoolError::invalid("max_tokens", "must be greater than 0"));
        }
        Ok(())
    }

    /// Capture the drift-tracked fields.
    #[must_use]
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// A drift-tracked configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedField {
    Provider,
    Model,
    ApiKey,
    BaseUrl,
    Temperature,
    MaxTokens,
}

impl TrackedField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Model => "model",
            Self::ApiKey => "api_key",
            Self::BaseUrl => "base_url",
            Self::Temperature => "temperature",
            Self::MaxTokens => "max_tokens",
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The drift-tracked subset of a [`ModelConfig`].
#[derive(Clone, PartialEq)]
pub struct ConfigSnapshot {
    provider: Provider,
    model: String,
    api_key: String,
    base_url: String,
    temperature: f64,
    max_tokens: Option<u32>,
}

impl ConfigSnapshot {
    /// First tracked field that differs between `self` and `incoming`.
    #[must_use]
    pub fn drift(&self, incoming: &ModelConfig) -> Option<TrackedField> {
        if self.provider != incoming.provider {
            Some(TrackedField::Provider)
        } else if self.model != incoming.model {
            Some(TrackedField::Model)
        } else if self.api_key != incoming.api_key {
            Some(TrackedField::ApiKey)
        } else if self.base_url != incoming.base_url {
            Some(TrackedField::BaseUrl)
        } else if self.temperature != incoming.temperature {
            Some(TrackedField::Temperature)
        } else if self.max_tokens != incoming.max_tokens {
            Some(TrackedField::MaxTokens)
        } else {
            None
        }
    }
}

impl fmt::Debug for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSnapshot")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

/// Full configuration of a consumer: one model config per owned role.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsumerConfig {
    Single(ModelConfig),
    Dual {
        model_a: ModelConfig,
        model_b: ModelConfig,
    },
}

impl ConsumerConfig {
    #[must_use]
    pub fn kind(&self) -> ConsumerKind {
        match self {
            Self::Single(_) => ConsumerKind::Single,
            Self::Dual { .. } => ConsumerKind::Dual,
        }
    }

    /// Model config for `role`, if this consumer owns that role.
    #[must_use]
    pub fn model(&self, role: ModelRole) -> Option<&ModelConfig> {
        match (self, role) {
            (Self::Single(config), ModelRole::Primary) => Some(config),
            (Self::Dual { model_a, .. }, ModelRole::ModelA) => Some(model_a),
            (Self::Dual { model_b, .. }, ModelRole::ModelB) => Some(model_b),
            _ => None,
        }
    }

    /// `(role, config)` pairs in role order.
    #[must_use]
    pub fn models(&self) -> Vec<(ModelRole, &ModelConfig)> {
        self.kind()
            .roles()
            .iter()
            .filter_map(|role| self.model(*role).map(|config| (*role, config)))
            .collect()
    }
}
