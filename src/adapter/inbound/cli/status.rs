//! Handler for the `status` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::StatusArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::domain::stats::{KeyPoolStats, PoolHealth};
use crate::error::Result;
use crate::port::inbound::operator::status::StatusSnapshot;

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Idle")]
    idle: usize,
    #[tabled(rename = "Busy")]
    busy: usize,
    #[tabled(rename = "Capacity")]
    capacity: usize,
    #[tabled(rename = "Utilization")]
    utilization: String,
}

impl From<&KeyPoolStats> for PoolRow {
    fn from(pool: &KeyPoolStats) -> Self {
        Self {
            key: pool.key.to_string(),
            idle: pool.idle_count,
            busy: pool.busy_count,
            capacity: pool.capacity,
            utilization: format!("{:.0}%", pool.utilization() * 100.0),
        }
    }
}

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if the status file exists but cannot be parsed.
pub fn execute(args: &StatusArgs) -> Result<()> {
    if !args.file.exists() {
        if output::is_json() {
            output::json_output(json!({
                "command": "status",
                "file": args.file.display().to_string(),
                "status": "missing",
            }));
            return Ok(());
        }
        output::warning(&format!("Status file not found ({})", args.file.display()));
        output::hint("start the pool with `warmpool run`");
        return Ok(());
    }

    let status = operator::operator().load_status(&std::fs::read_to_string(&args.file)?)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "status",
            "file": args.file.display().to_string(),
            "status": "ok",
            "snapshot": serde_json::to_value(&status)?,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    display(&status);
    Ok(())
}

fn display(status: &StatusSnapshot) {
    let global = &status.stats.global;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Health", health_label(status.health));
    output::field("PID", status.pid);
    output::field(
        "Started",
        status.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    output::field(
        "Updated",
        output::muted(status.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
    );
    if output::verbosity() > 0 {
        output::field("Consumers", status.consumers.join(", "));
        output::field("Pool size", status.size_per_key);
        output::field("Max idle", format!("{}s", status.max_idle_secs));
    }

    output::section("Connections");
    output::field("Active", global.current_active);
    output::field("Idle", global.current_idle);
    output::field("Created", global.total_created);
    output::field("Reused", global.total_reused);
    output::field("Released", global.total_released);
    output::field("Recycled", global.total_recycled);

    output::section("Pools");
    if status.stats.pools.is_empty() {
        output::hint("no pools yet");
        return;
    }
    let rows: Vec<PoolRow> = status.stats.pools.iter().map(PoolRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::field(
        "Utilization",
        format!("{:.0}% avg", status.stats.average_utilization() * 100.0),
    );
}

fn health_label(health: PoolHealth) -> String {
    match health {
        PoolHealth::Healthy => output::positive(health),
        PoolHealth::Busy => output::negative(health),
        PoolHealth::Empty => output::muted(health),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ConsumerId;
    use crate::domain::key::PoolKey;

    #[test]
    fn pool_row_formats_utilization() {
        let row = PoolRow::from(&KeyPoolStats {
            key: PoolKey::primary(ConsumerId::new("42")),
            idle_count: 1,
            busy_count: 3,
            capacity: 4,
        });
        assert_eq!(row.utilization, "75%");
        assert_eq!(row.key, "42/primary");
    }
}
