//! Delivery worker: polls the task service at a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use redrive_core::TaskProcessor;

/// Cooperative polling loop around [`TaskProcessor::process_due_tasks`].
///
/// Processing errors are logged and the loop keeps running; it only
/// exits on cancellation. Horizontal parallelism comes from running more
/// replicas, not from fanning out within one.
pub struct DeliveryWorker {
    service: Arc<dyn TaskProcessor>,
    poll_interval: Duration,
}

impl DeliveryWorker {
    pub fn new(service: Arc<dyn TaskProcessor>, poll_interval: Duration) -> Self {
        Self {
            service,
            poll_interval,
        }
    }

    /// Run the polling loop until `cancel` is triggered. Returns after at
    /// most one in-flight processing iteration once cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "worker started");

        let start = time::Instant::now() + self.poll_interval;
        let mut ticker = time::interval_at(start, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("worker shutting down");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(err) = self.service.process_due_tasks().await {
                        error!(error = %err, "error processing due tasks");
                    }
                }
            }
        }
    }
}
