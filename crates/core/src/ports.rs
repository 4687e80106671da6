//! Port traits connecting the core to its adapters.

use std::time::Duration;

use async_trait::async_trait;

use crate::destination::Destination;
use crate::error::{HealthError, ProduceError, SchedulerError, TaskError};
use crate::task::Task;

/// Time-ordered queue of pending tasks, shared across worker replicas.
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    /// Insert `task` with due time `now + delay`.
    async fn schedule(&self, task: &Task, delay: Duration) -> Result<(), SchedulerError>;

    /// Atomically claim up to `limit` due tasks, ascending by due time.
    ///
    /// A claimed entry is removed from the store before it is returned, so
    /// no two callers ever observe the same entry. Malformed entries are
    /// removed and skipped with a warning instead of surfacing an error.
    async fn fetch_due(&self, limit: usize) -> Result<Vec<Task>, SchedulerError>;

    /// Remove an exact serialized entry. Housekeeping only; the primary
    /// pipeline claims through `fetch_due`.
    async fn remove(&self, raw_member: &str) -> Result<(), SchedulerError>;
}

/// One-shot message delivery to an external destination.
#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Send a message to the specified destination.
    async fn produce(
        &self,
        destination: &Destination,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProduceError>;

    /// Release any resources held by the producer.
    async fn close(&self) -> Result<(), ProduceError>;
}

/// Driving-side surface used by the delivery worker.
#[async_trait]
pub trait TaskProcessor: Send + Sync {
    /// Fetch and process all tasks whose scheduled time has passed.
    async fn process_due_tasks(&self) -> Result<(), TaskError>;
}

/// Probe for an external dependency, aggregated by `GET /health`.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name of the dependency being checked.
    fn name(&self) -> &str;

    /// Returns an error when the dependency is unhealthy.
    async fn check(&self) -> Result<(), HealthError>;
}
