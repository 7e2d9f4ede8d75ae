//! Command-line interface definitions.
//!
//! Defines the CLI structure for warmpool using `clap`: running the pool in
//! the foreground, reading its status file, validating configuration and
//! sending a one-off completion through a pooled client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Prewarmed LLM client connection pool
#[derive(Parser, Debug)]
#[command(name = "warmpool")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the warmpool CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prewarm every configured consumer and keep the pool running
    Run(RunArgs),

    /// Show pool status from a running instance's status file
    Status(StatusArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Send one prompt through a pooled client
    Complete(CompleteArgs),
}

/// Subcommands for `warmpool check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and resolve every consumer.
    Config(ConfigPathArg),
}

/// Shared argument for commands that take a config file path.
#[derive(clap::Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `warmpool run`.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Status file path (overrides `status.file`)
    #[arg(long)]
    pub status_file: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `warmpool status`.
#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Status file path
    #[arg(short, long, default_value_os_t = paths::default_status_file())]
    pub file: PathBuf,
}

/// Arguments for `warmpool complete`.
#[derive(clap::Args, Debug)]
pub struct CompleteArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Consumer id as configured
    #[arg(long)]
    pub consumer: String,

    /// Model slot to use (primary, model_a, model_b)
    #[arg(long, default_value = "primary")]
    pub role: String,

    /// Prompt text
    pub prompt: String,
}
