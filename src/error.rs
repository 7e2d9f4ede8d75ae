use thiserror::Error;

use crate::domain::key::PoolKey;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Client handle construction errors.
///
/// Produced by a [`ClientFactory`](crate::port::outbound::factory::ClientFactory);
/// the pool treats them as opaque.
#[derive(Error, Debug, Clone)]
pub enum FactoryError {
    #[error("failed to build HTTP client: {0}")]
    Http(String),

    #[error("unsupported client configuration: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for FactoryError {
    fn from(err: reqwest::Error) -> Self {
        FactoryError::Http(err.to_string())
    }
}

/// Errors surfaced by the connection registry.
///
/// Releasing an unknown connection is not an error: it is logged and
/// reported as
/// [`ReleaseOutcome::Unknown`](crate::application::pool::registry::ReleaseOutcome::Unknown).
#[derive(Error, Debug, Clone)]
pub enum PoolError {
    #[error("invalid model config {field}: {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    #[error("failed to create client for {key}: {source}")]
    Factory {
        key: PoolKey,
        #[source]
        source: FactoryError,
    },

    #[error("pool unavailable for {key}: {reason}")]
    PoolUnavailable { key: PoolKey, reason: String },
}

impl PoolError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
