//! Status file for external monitoring.
//!
//! Writes a JSON status file that external tools (and `warmpool status`) can
//! poll to monitor a running pool.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::domain::stats::{PoolHealth, PoolStats};
use crate::error::Result;
use crate::application::pool::config::PoolConfig;

/// Current status file format version.
const STATUS_VERSION: &str = "1";

/// Top-level status file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusFile {
    /// Schema version for forward compatibility.
    pub version: String,
    /// When the process started.
    pub started_at: DateTime<Utc>,
    /// Process ID.
    pub pid: u32,
    /// Static configuration snapshot.
    pub config: StatusSettings,
    /// Health derived from `stats` at write time.
    pub health: PoolHealth,
    /// Latest registry snapshot.
    pub stats: PoolStats,
    /// When this file was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Static configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSettings {
    pub size_per_key: usize,
    pub max_idle_secs: u64,
    pub reap_interval_secs: u64,
    /// Configured consumer ids.
    pub consumers: Vec<String>,
}

impl StatusSettings {
    #[must_use]
    pub fn new(pool: &PoolConfig, consumers: Vec<String>) -> Self {
        Self {
            size_per_key: pool.size_per_key,
            max_idle_secs: pool.max_idle_secs,
            reap_interval_secs: pool.reap_interval_secs,
            consumers,
        }
    }
}

impl StatusFile {
    /// Read a status file written by [`StatusWriter`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Decode a status document.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a status document.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Writer for the status file.
///
/// Thread-safe wrapper that manages atomic updates to the status file.
pub struct StatusWriter {
    /// Path to write the status file.
    path: PathBuf,
    /// Current status state.
    status: Mutex<StatusFile>,
}

impl StatusWriter {
    #[must_use]
    pub fn new(path: PathBuf, config: StatusSettings) -> Self {
        let now = Utc::now();
        let status = StatusFile {
            version: STATUS_VERSION.to_string(),
            started_at: now,
            pid: std::process::id(),
            config,
            health: PoolHealth::Empty,
            stats: PoolStats::default(),
            updated_at: now,
        };

        Self {
            path,
            status: Mutex::new(status),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the registry snapshot.
    pub fn update_stats(&self, stats: PoolStats) {
        let mut status = self.status.lock();
        status.health = stats.global.health();
        status.stats = stats;
    }

    /// Write the current status to the file atomically.
    ///
    /// Uses write-to-temp-then-rename pattern for atomicity.
    /// Creates parent directory if it doesn't exist.
    pub fn write(&self) -> Result<()> {
        // Serialize while holding lock, release before I/O
        let json = {
            let mut status = self.status.lock();
            status.updated_at = Utc::now();
            serde_json::to_string_pretty(&*status)?
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;

        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ConsumerId;
    use crate::domain::key::PoolKey;
    use crate::domain::stats::{GlobalStats, KeyPoolStats};

    fn settings() -> StatusSettings {
        StatusSettings::new(&PoolConfig::default(), vec!["42".to_string()])
    }

    fn stats() -> PoolStats {
        PoolStats {
            global: GlobalStats {
                total_created: 5,
                total_reused: 3,
                total_released: 2,
                total_recycled: 0,
                current_active: 1,
                current_idle: 4,
            },
            pools: vec![KeyPoolStats {
                key: PoolKey::primary(ConsumerId::new("42")),
                idle_count: 4,
                busy_count: 1,
                capacity: 5,
            }],
        }
    }

    #[test]
    fn test_status_writer_new() {
        let writer = StatusWriter::new(PathBuf::from("/tmp/unused.json"), settings());

        let status = writer.status.lock();
        assert_eq!(status.version, "1");
        assert_eq!(status.pid, std::process::id());
        assert_eq!(status.health, PoolHealth::Empty);
        assert_eq!(status.config.size_per_key, 5);
    }

    #[test]
    fn test_update_stats_recomputes_health() {
        let writer = StatusWriter::new(PathBuf::from("/tmp/unused.json"), settings());
        writer.update_stats(stats());

        let status = writer.status.lock();
        assert_eq!(status.health, PoolHealth::Healthy);
        assert_eq!(status.stats.global.total_created, 5);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/status.json");

        let writer = StatusWriter::new(path.clone(), settings());
        writer.update_stats(stats());
        writer.write().unwrap();

        let read = StatusFile::read(&path).unwrap();
        assert_eq!(read.stats, stats());
        assert_eq!(read.config, settings());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_status_file_json_layout() {
        let writer = StatusWriter::new(PathBuf::from("/tmp/unused.json"), settings());
        writer.update_stats(stats());
        let json = serde_json::to_string_pretty(&*writer.status.lock()).unwrap();

        assert!(json.contains("\"health\": \"healthy\""));
        assert!(json.contains("\"total_created\": 5"));
        assert!(json.contains("\"role\": \"primary\""));
    }

    #[test]
    fn test_read_missing_file_errors() {
        assert!(StatusFile::read(Path::new("/nonexistent/warmpool/status.json")).is_err());
    }
}
