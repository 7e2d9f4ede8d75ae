//! Diagnostic checks.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::{ConfigError, Result};
use crate::port::inbound::operator::config::{ConfigCheckReport, ConsumerView};

/// Validate the config file and resolve every consumer's credentials.
///
/// # Errors
///
/// Returns an error if the file does not load, or if any consumer fails to
/// resolve.
pub fn config(path: &Path) -> Result<()> {
    let config_toml = operator::read_config_toml(path)?;
    let report = operator::operator().check_config(&config_toml)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": path.display().to_string(),
            "valid": report.is_valid(),
            "report": report,
        }));
    } else {
        display(path, &report);
    }

    if !report.is_valid() {
        return Err(ConfigError::InvalidValue {
            field: "consumers",
            reason: format!("{} consumer(s) failed to resolve", report.failed()),
        }
        .into());
    }

    if !output::is_json() {
        println!();
        output::success("Configuration is valid");
    }
    Ok(())
}

fn display(path: &Path, report: &ConfigCheckReport) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());
    output::field("Pool size", report.pool.size_per_key);
    output::field("Max idle", format!("{}s", report.pool.max_idle_secs));
    if output::verbosity() > 0 {
        output::field("Reap every", format!("{}s", report.pool.reap_interval_secs));
        let lifetime = match report.pool.max_lifetime_secs {
            0 => "unlimited".to_string(),
            secs => format!("{secs}s"),
        };
        output::field("Max lifetime", lifetime);
    }

    output::section("Consumers");
    if report.consumers.is_empty() {
        output::hint("no [[consumers]] configured; `warmpool run` will idle");
    }
    for consumer in &report.consumers {
        match &consumer.error {
            None => output::success(&summary(consumer)),
            Some(error) => output::warning(&format!("{}: {error}", consumer.id)),
        }
    }
}

fn summary(consumer: &ConsumerView) -> String {
    let models: Vec<String> = consumer
        .models
        .iter()
        .map(|m| format!("{}:{} ({})", m.provider, m.model, m.key_source))
        .collect();
    format!(
        "{} {} {}",
        output::highlight(&consumer.id),
        output::muted(&consumer.kind),
        models.join(", ")
    )
}
