//! Consumer configuration as written in the config file.
//!
//! [`ConsumerSettings`] mirrors the TOML layout. Credentials may be given
//! inline or through an environment variable, so turning settings into a
//! [`ConsumerConfig`] is a separate, fallible step
//! ([`ConsumerSettings::resolve`]).

use serde::Deserialize;

use crate::domain::id::ConsumerId;
use crate::domain::key::ConsumerKind;
use crate::domain::model::{ConsumerConfig, ModelConfig, Provider, DEFAULT_TEMPERATURE};
use crate::error::{ConfigError, PoolError};

/// One `[[consumers]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumerSettings {
    pub id: String,
    #[serde(default)]
    pub kind: ConsumerKind,
    /// Model of a single consumer.
    #[serde(default)]
    pub model: Option<ModelSettings>,
    /// First model of a dual consumer.
    #[serde(default)]
    pub model_a: Option<ModelSettings>,
    /// Second model of a dual consumer.
    #[serde(default)]
    pub model_b: Option<ModelSettings>,
}

/// One model slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub provider: Provider,
    pub model: String,
    /// Inline credential. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the credential.
    ///
    /// When neither this nor `api_key` is set, the provider's conventional
    /// variable is used (`OPENAI_API_KEY` or `ANTHROPIC_API_KEY`).
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Defaults to the provider's public endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl ModelSettings {
    fn default_key_env(&self) -> &'static str {
        match self.provider {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Name of the variable the credential will be read from, if not inline.
    #[must_use]
    pub fn key_source(&self) -> String {
        match (&self.api_key, &self.api_key_env) {
            (Some(_), _) => "inline".to_string(),
            (None, Some(var)) => format!("${var}"),
            (None, None) => format!("${}", self.default_key_env()),
        }
    }

    /// Build a validated [`ModelConfig`], reading the credential if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential cannot be found or a value is out
    /// of range.
    pub fn resolve(&self) -> Result<ModelConfig, ConfigError> {
        let api_key = match (&self.api_key, &self.api_key_env) {
            (Some(key), _) => key.clone(),
            (None, Some(var)) => read_env(var)?,
            (None, None) => read_env(self.default_key_env())?,
        };

        let mut config = ModelConfig::new(self.provider, self.model.clone(), api_key)
            .with_temperature(self.temperature);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config.max_tokens = self.max_tokens;
        config.request_timeout_secs = self.request_timeout_secs;

        config.validate().map_err(|e| match e {
            PoolError::ConfigInvalid { field, reason } => {
                ConfigError::InvalidValue { field, reason }
            }
            other => ConfigError::InvalidValue {
                field: "model",
                reason: other.to_string(),
            },
        })?;
        Ok(config)
    }
}

fn read_env(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            field: "api_key_env",
            reason: format!("environment variable {var} is not set"),
        }),
    }
}

impl ConsumerSettings {
    #[must_use]
    pub fn consumer_id(&self) -> ConsumerId {
        ConsumerId::new(self.id.clone())
    }

    /// Check the shape of the entry without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the model slots do not match
    /// `kind`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "id" });
        }

        let shape_error = |reason: &str| ConfigError::InvalidValue {
            field: "consumers",
            reason: format!("consumer '{}': {reason}", self.id),
        };
        match self.kind {
            ConsumerKind::Single => {
                if self.model.is_none() {
                    return Err(shape_error("single consumer needs [model]"));
                }
                if self.model_a.is_some() || self.model_b.is_some() {
                    return Err(shape_error("single consumer must not set model_a/model_b"));
                }
            }
            ConsumerKind::Dual => {
                if self.model_a.is_none() || self.model_b.is_none() {
                    return Err(shape_error("dual consumer needs [model_a] and [model_b]"));
                }
                if self.model.is_some() {
                    return Err(shape_error("dual consumer must not set model"));
                }
            }
        }

        for slot in self.slots() {
            if slot.model.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "model" });
            }
        }
        Ok(())
    }

    /// Configured model slots in role order.
    pub fn slots(&self) -> impl Iterator<Item = &ModelSettings> {
        [&self.model, &self.model_a, &self.model_b]
            .into_iter()
            .flatten()
    }

    /// Build the runtime config for this consumer.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is malformed or a slot fails to resolve.
    pub fn resolve(&self) -> Result<ConsumerConfig, ConfigError> {
        self.validate()?;
        match (self.kind, &self.model, &self.model_a, &self.model_b) {
            (ConsumerKind::Single, Some(model), _, _) => {
                Ok(ConsumerConfig::Single(model.resolve()?))
            }
            (ConsumerKind::Dual, _, Some(a), Some(b)) => Ok(ConsumerConfig::Dual {
                model_a: a.resolve()?,
                model_b: b.resolve()?,
            }),
            _ => Err(ConfigError::MissingField { field: "model" }),
        }
    }
}
