//! Path utilities for warmpool.
//!
//! All data lives under `~/.warmpool/`:
//! - `~/.warmpool/config.toml` - main configuration
//! - `~/.warmpool/status.json` - status snapshot written by `warmpool run`

use std::path::PathBuf;

/// Returns the warmpool home directory (`~/.warmpool/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".warmpool")
}

/// Returns the default config file path (`~/.warmpool/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default status file path (`~/.warmpool/status.json`).
pub fn default_status_file() -> PathBuf {
    home_dir().join("status.json")
}
