//! Pool runtime lifecycle.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::application::pool::reaper::Reaper;
use crate::application::pool::registry::ConnectionRegistry;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_registry, prewarm_consumers};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::status_file::{StatusSettings, StatusWriter};

/// Run until `shutdown` flips to `true` (or its sender is dropped).
///
/// Builds and prewarms the registry, starts the reaper and refreshes the
/// status file every `status.interval_secs`. On the way out the reaper is
/// stopped, the registry shut down and a final status written.
///
/// # Errors
///
/// Returns an error if the registry cannot be built.
pub async fn run_with_shutdown(
    config: Config,
    status_path: PathBuf,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(consumers = config.consumers.len(), "Starting warmpool");

    let registry = build_registry(&config)?;
    prewarm_consumers(&registry, &config);

    let reaper = Reaper::spawn(registry.clone());

    let writer = StatusWriter::new(
        status_path,
        StatusSettings::new(
            &config.pool,
            config.consumers.iter().map(|c| c.id.clone()).collect(),
        ),
    );
    write_status(&writer, &registry);
    info!(path = %writer.path().display(), "Status file enabled");

    let mut status_interval =
        tokio::time::interval(Duration::from_secs(config.status.interval_secs));
    status_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                match result {
                    Ok(()) => {
                        if *shutdown.borrow() {
                            info!("Shutdown signal received");
                            break;
                        }
                    }
                    Err(_) => {
                        info!("Shutdown channel closed");
                        break;
                    }
                }
            }
            _ = status_interval.tick() => {
                write_status(&writer, &registry);
            }
        }
    }

    reaper.stop().await;
    registry.shutdown();
    write_status(&writer, &registry);

    info!("warmpool stopped");
    Ok(())
}

fn write_status(writer: &StatusWriter, registry: &ConnectionRegistry) {
    writer.update_stats(registry.stats());
    if let Err(e) = writer.write() {
        warn!(error = %e, "Failed to write status file");
    }
}
