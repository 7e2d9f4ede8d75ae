//! Runtime control types for operator-facing adapters.

use async_trait::async_trait;

use crate::error::Result;

/// Runtime configuration overrides from CLI flags.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,

    /// Override for log level (e.g., "debug", "info", "warn").
    pub log_level: Option<String>,

    /// Whether to output logs as JSON.
    pub json_logs: bool,

    /// Status file location from the command line. Wins over `status.file`.
    pub status_file: Option<String>,

    /// Status file location when neither the flag nor the config sets one.
    pub default_status_file: String,
}

/// Effective settings shown before the pool starts.
#[derive(Debug, Clone)]
pub struct RunStartupSnapshot {
    pub consumers: Vec<String>,
    pub size_per_key: usize,
    pub max_idle_secs: u64,
    pub reap_interval_secs: u64,
    pub status_interval_secs: u64,
    pub status_file: String,
}

/// Runtime use-cases for operator-facing adapters.
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Resolve the effective settings without starting anything.
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot>;

    /// Run the pool until Ctrl-C.
    async fn execute_run(&self, request: RunRequest) -> Result<()>;
}
