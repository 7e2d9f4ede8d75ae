//! Background idle eviction.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::registry::ConnectionRegistry;

/// Periodic task calling [`ConnectionRegistry::reap_idle`].
///
/// Stops on [`stop`](Self::stop) or when the registry shuts down. Dropping a
/// `Reaper` without stopping it also ends the task at its next wake-up,
/// since the stop channel closes.
pub struct Reaper {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Reaper {
    /// Start reaping at the registry's configured interval.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(registry: Arc<ConnectionRegistry>) -> Self {
        let interval = registry.config().reap_interval();
        Self::spawn_with_interval(registry, interval)
    }

    /// Start reaping at an explicit interval.
    #[must_use]
    pub fn spawn_with_interval(registry: Arc<ConnectionRegistry>, period: Duration) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let closed_rx = registry.subscribe_closed();
        let handle = tokio::spawn(reaper_task(registry, period, stop_rx, closed_rx));
        Self { stop_tx, handle }
    }

    /// Signal the task and wait for it to exit.
    pub async fn stop(self) {
        self.stop_tx.send_replace(true);
        if let Err(e) = self.handle.await {
            debug!(error = %e, "Reaper task ended abnormally");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn reaper_task(
    registry: Arc<ConnectionRegistry>,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
    mut closed_rx: watch::Receiver<bool>,
) {
    if *closed_rx.borrow() {
        return;
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // First tick completes immediately.
    interval.tick().await;

    info!(interval_secs = period.as_secs_f64(), "Reaper started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                registry.reap_idle();
            }
            result = stop_rx.changed() => {
                if result.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            result = closed_rx.changed() => {
                if result.is_err() || *closed_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("Reaper stopped");
}
