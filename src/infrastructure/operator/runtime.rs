//! Runtime operator implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::runtime::run_with_shutdown;
use crate::port::inbound::operator::runtime::{RunRequest, RunStartupSnapshot, RuntimeOperator};

use super::{entry::Operator, shared};

impl Operator {
    fn load_run_config(&self, request: &RunRequest) -> Result<Config> {
        let mut config = Config::parse_toml(&request.config_toml)?;
        if let Some(level) = &request.log_level {
            config.logging.level = level.clone();
        }
        if request.json_logs {
            config.logging.format = "json".to_string();
        }
        Ok(config)
    }
}

/// Flag, then `status.file`, then the caller's default.
fn status_file(request: &RunRequest, config: &Config) -> String {
    request
        .status_file
        .clone()
        .or_else(|| config.status.file.clone())
        .unwrap_or_else(|| request.default_status_file.clone())
}

#[async_trait]
impl RuntimeOperator for Operator {
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot> {
        let config = self.load_run_config(request)?;

        Ok(RunStartupSnapshot {
            consumers: config.consumers.iter().map(|c| c.id.clone()).collect(),
            size_per_key: config.pool.size_per_key,
            max_idle_secs: config.pool.max_idle_secs,
            reap_interval_secs: config.pool.reap_interval_secs,
            status_interval_secs: config.status.interval_secs,
            status_file: status_file(request, &config),
        })
    }

    async fn execute_run(&self, request: RunRequest) -> Result<()> {
        let config = self.load_run_config(&request)?;
        let status_path = PathBuf::from(status_file(&request, &config));
        config.init_logging();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut app_handle =
            tokio::spawn(async move { run_with_shutdown(config, status_path, shutdown_rx).await });

        tokio::select! {
            result = &mut app_handle => {
                return shared::map_app_result(result);
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                let _ = shutdown_tx.send(true);
            }
        }

        shared::map_app_result(app_handle.await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(config_toml: &str, status_file: Option<&str>) -> RunRequest {
        RunRequest {
            config_toml: config_toml.to_string(),
            log_level: Some("debug".to_string()),
            json_logs: true,
            status_file: status_file.map(str::to_string),
            default_status_file: "/home/u/.warmpool/status.json".to_string(),
        }
    }

    #[test]
    fn status_file_precedence() {
        let with_file = "[status]\nfile = \"/srv/pool.json\"\n";

        let flag = Operator
            .prepare_run(&request(with_file, Some("/tmp/flag.json")))
            .unwrap();
        assert_eq!(flag.status_file, "/tmp/flag.json");

        let configured = Operator.prepare_run(&request(with_file, None)).unwrap();
        assert_eq!(configured.status_file, "/srv/pool.json");

        let fallback = Operator.prepare_run(&request("", None)).unwrap();
        assert_eq!(fallback.status_file, "/home/u/.warmpool/status.json");
    }

    #[test]
    fn overrides_apply_to_logging() {
        let config = Operator.load_run_config(&request("", None)).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn snapshot_lists_consumers() {
        let toml = r#"
[[consumers]]
id = "42"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk"
"#;
        let snapshot = Operator.prepare_run(&request(toml, None)).unwrap();
        assert_eq!(snapshot.consumers, vec!["42".to_string()]);
        assert_eq!(snapshot.size_per_key, 5);
        assert_eq!(snapshot.status_interval_secs, 30);
    }
}
