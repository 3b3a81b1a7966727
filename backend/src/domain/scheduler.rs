//! Background task that runs archival on a fixed period.
//!
//! The first run happens right after start. Missed ticks are not caught up.
//! Stopping only takes effect between runs, never in the middle of one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::domain::archival::ArchivalService;
use crate::domain::clock::Clock;

pub struct ArchivalScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ArchivalScheduler {
    /// Spawn the archival loop on the current tokio runtime
    pub fn start(service: ArchivalService, period: Duration, clock: Arc<dyn Clock>) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        info!("Starting archival scheduler every {:?} ({:?})", period, service.scope());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }

                let today = clock.today();
                if let Err(e) = service.archive(today).await {
                    error!("Archival run for {} failed: {:#}", today, e);
                }
            }

            info!("Archival scheduler stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal the loop to exit and wait for it. A run in progress finishes first.
    pub async fn stop(self) {
        if self.shutdown.send(true).is_err() {
            warn!("Archival scheduler already exited");
        }
        if let Err(e) = self.handle.await {
            error!("Archival scheduler task failed: {}", e);
        }
    }
}
