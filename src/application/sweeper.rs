use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

use crate::application::use_cases::{ExpireObjectsUseCase, SweepError, SweepOutcome};

/// Background retention sweeper.
///
/// Fires an expiration pass on a fixed interval, independent of traffic.
/// Passes cannot overlap: the loop is a single task that awaits each pass,
/// and the pass itself serializes on the ledger lock, so even an externally
/// triggered pass is safe.
pub struct RetentionSweeper {
    expire_use_case: Arc<ExpireObjectsUseCase>,
    interval: Duration,
}

impl RetentionSweeper {
    pub fn new(expire_use_case: Arc<ExpireObjectsUseCase>, interval: Duration) -> Self {
        Self {
            expire_use_case,
            interval,
        }
    }

    /// Run the sweep loop.
    pub async fn run(self: Arc<Self>) {
        info!(
            "Starting retention sweeper with interval: {:?}",
            self.interval
        );

        let mut interval = time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep_once().await {
                Ok(outcome) => {
                    if outcome.has_deletions() {
                        info!(
                            "Expiration pass removed {} objects, {} remain",
                            outcome.expired, outcome.kept
                        );
                    }
                    for err in &outcome.errors {
                        error!("Sweep error: {}", err);
                    }
                }
                Err(e) => {
                    error!("Expiration pass failed: {}", e);
                }
            }
        }
    }

    /// Run a single pass at the current wall-clock time. Exposed so tests
    /// and operators can trigger a pass without waiting on the timer.
    pub async fn sweep_once(&self) -> Result<SweepOutcome, SweepError> {
        self.expire_use_case.execute(Utc::now()).await
    }
}
