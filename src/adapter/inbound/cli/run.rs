//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{operator, output, paths};
use crate::error::Result;
use crate::port::inbound::operator::runtime::{RunRequest, RunStartupSnapshot};

/// Execute the run command. Returns after Ctrl-C once the pool has drained.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let request = build_run_request(args, operator::read_config_toml(&args.config)?);
    let service = operator::operator();

    if !output::is_quiet() && !output::is_json() {
        let startup = service.prepare_run(&request)?;
        print_startup(args, &startup);
    }

    service.execute_run(request).await
}

fn build_run_request(args: &RunArgs, config_toml: String) -> RunRequest {
    RunRequest {
        config_toml,
        log_level: args.log_level.clone(),
        // Human output and JSON logs would interleave on stdout.
        json_logs: args.json_logs || output::is_json(),
        status_file: args
            .status_file
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        default_status_file: paths::default_status_file().to_string_lossy().to_string(),
    }
}

fn print_startup(args: &RunArgs, snapshot: &RunStartupSnapshot) {
    let consumers = if snapshot.consumers.is_empty() {
        output::muted("none")
    } else {
        snapshot.consumers.join(", ")
    };

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", args.config.display());
    output::field("Consumers", consumers);
    output::field("Pool size", snapshot.size_per_key);
    output::field("Max idle", format!("{}s", snapshot.max_idle_secs));
    if output::verbosity() > 0 {
        output::field("Reap every", format!("{}s", snapshot.reap_interval_secs));
        output::field("Status every", format!("{}s", snapshot.status_interval_secs));
    }
    output::field("Status file", &snapshot.status_file);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn run_request_carries_flags() {
        let args = RunArgs {
            config: PathBuf::from("config.toml"),
            status_file: Some(PathBuf::from("/tmp/s.json")),
            log_level: Some("warn".to_string()),
            json_logs: true,
        };

        let request = build_run_request(&args, "[pool]".to_string());

        assert_eq!(request.config_toml, "[pool]");
        assert_eq!(request.status_file.as_deref(), Some("/tmp/s.json"));
        assert_eq!(request.log_level.as_deref(), Some("warn"));
        assert!(request.json_logs);
        assert!(request.default_status_file.ends_with("status.json"));
    }
}
