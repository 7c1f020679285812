//! Background sweep of expired entries.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::ttl_cache::TtlCache;

/// Handle for controlling a running sweeper.
///
/// Dropping the handle stops the sweeper.
pub struct SweepHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the sweeper to stop. The task exits on its next poll.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Returns true once the sweeper task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<V: Send + Sync + 'static> TtlCache<V> {
    /// Starts the periodic sweep on the current tokio runtime.
    ///
    /// The first sweep runs one full `sweep_interval` after this call.
    /// The task keeps a handle to the cache until it is stopped.
    pub fn start_sweeper(&self) -> SweepHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_sweeper(self.clone(), shutdown_rx));

        SweepHandle { shutdown_tx, task }
    }
}

async fn run_sweeper<V>(cache: TtlCache<V>, mut shutdown_rx: watch::Receiver<bool>) {
    let period = cache.config().sweep_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting cache sweeper with interval {:?}", period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = cache.purge_expired();
                debug!(removed, remaining = cache.len(), "Cache sweep finished");
            }
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    info!("Cache sweeper shutting down");
                    break;
                }
            }
        }
    }
}
