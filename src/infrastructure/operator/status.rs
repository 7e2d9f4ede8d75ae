//! Status operator implementation.

use crate::error::Result;
use crate::infrastructure::status_file::StatusFile;
use crate::port::inbound::operator::status::{StatusOperator, StatusSnapshot};

use super::entry::Operator;

impl StatusOperator for Operator {
    fn load_status(&self, status_json: &str) -> Result<StatusSnapshot> {
        let status = StatusFile::parse(status_json)?;
        Ok(StatusSnapshot {
            pid: status.pid,
            started_at: status.started_at,
            updated_at: status.updated_at,
            health: status.health,
            consumers: status.config.consumers,
            size_per_key: status.config.size_per_key,
            max_idle_secs: status.config.max_idle_secs,
            stats: status.stats,
        })
    }
}
