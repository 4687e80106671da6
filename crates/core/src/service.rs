//! Task orchestration: validation, scheduling, delivery, retry routing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::constants::{DEFAULT_BATCH_SIZE, MAX_BASE_DELAY, MAX_RETRY_LIMIT, MIN_BASE_DELAY};
use crate::destination::{Destination, DestinationKind};
use crate::error::TaskError;
use crate::ports::{MessageProducer, TaskProcessor, TaskScheduler};
use crate::task::Task;

/// Delay applied to a task's first delivery attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialDelay {
    /// Wait `base_delay` seconds before the first attempt.
    #[default]
    BaseDelay,
    /// Make the task due on the next poll cycle.
    Immediate,
}

/// Orchestrates task creation and the delivery/retry/dead-letter pipeline.
pub struct TaskService {
    scheduler: Arc<dyn TaskScheduler>,
    producer: Arc<dyn MessageProducer>,
    batch_size: usize,
    initial_delay: InitialDelay,
}

impl TaskService {
    pub fn new(scheduler: Arc<dyn TaskScheduler>, producer: Arc<dyn MessageProducer>) -> Self {
        Self {
            scheduler,
            producer,
            batch_size: DEFAULT_BATCH_SIZE,
            initial_delay: InitialDelay::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay: InitialDelay) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Validate and enqueue a new task for delivery.
    pub async fn create_task(&self, mut task: Task) -> Result<(), TaskError> {
        validate(&task).map_err(TaskError::Invalid)?;

        task.attempt = 0;

        let delay = match self.initial_delay {
            InitialDelay::BaseDelay => Duration::from_secs(task.base_delay),
            InitialDelay::Immediate => Duration::ZERO,
        };

        self.scheduler
            .schedule(&task, delay)
            .await
            .map_err(TaskError::ScheduleFailed)?;

        info!(
            task_id = %task.id,
            source = %task.source,
            destination_type = %task.destination_type,
            "task scheduled"
        );

        Ok(())
    }

    /// Fetch due tasks and run each through the delivery pipeline.
    ///
    /// Individual task failures are logged and never abort the batch; the
    /// only error returned is a failed fetch.
    pub async fn process_due_tasks(&self) -> Result<(), TaskError> {
        let tasks = self
            .scheduler
            .fetch_due(self.batch_size)
            .await
            .map_err(TaskError::FetchFailed)?;

        for task in tasks {
            self.process_task(task).await;
        }

        Ok(())
    }

    async fn process_task(&self, task: Task) {
        info!(task_id = %task.id, attempt = task.attempt, "processing task");

        let key = task.delivery_key();
        let result = self
            .producer
            .produce(&task.destination, key.as_bytes(), task.message_data.as_bytes())
            .await;

        match result {
            Ok(()) => {
                info!(task_id = %task.id, attempt = task.attempt, "task completed successfully");
            }
            Err(err) => {
                warn!(task_id = %task.id, attempt = task.attempt, error = %err, "delivery failed");
                self.handle_failure(task).await;
            }
        }
    }

    async fn handle_failure(&self, mut task: Task) {
        task.increment_attempt();

        if task.should_send_to_dead_destination() {
            error!(
                task_id = %task.id,
                max_retries = task.max_retries,
                attempts = task.attempt,
                "max retries exceeded, sending to dead-letter destination"
            );
            self.send_to_dead_letter(&task).await;
            return;
        }

        let delay = task.next_retry_delay();
        info!(
            task_id = %task.id,
            delay_secs = delay.as_secs(),
            next_attempt = task.attempt,
            "scheduling retry"
        );

        if let Err(err) = self.scheduler.schedule(&task, delay).await {
            error!(task_id = %task.id, error = %err, "failed to reschedule task");
        }
    }

    /// One-shot dispatch to the dead-letter destination. Not retried; a
    /// failure here is logged and the task is dropped.
    async fn send_to_dead_letter(&self, task: &Task) {
        if task.dead_destination.is_unset() {
            warn!(task_id = %task.id, "no dead-letter destination configured, dropping task");
            return;
        }

        let key = task.dead_letter_key();
        let result = self
            .producer
            .produce(
                &task.dead_destination,
                key.as_bytes(),
                task.message_data.as_bytes(),
            )
            .await;

        if let Err(err) = result {
            error!(task_id = %task.id, error = %err, "failed to send to dead-letter destination");
        }
    }
}

#[async_trait]
impl TaskProcessor for TaskService {
    async fn process_due_tasks(&self) -> Result<(), TaskError> {
        TaskService::process_due_tasks(self).await
    }
}

fn validate(task: &Task) -> Result<(), String> {
    if task.id.is_empty() {
        return Err("task ID is required".to_string());
    }
    if task.source.is_empty() {
        return Err("source is required".to_string());
    }
    match task.destination_type {
        DestinationKind::Kafka => {
            if !matches!(&task.destination, Destination::Kafka { topic, .. } if !topic.is_empty()) {
                return Err("destination topic is required".to_string());
            }
        }
        DestinationKind::Http => {
            if !matches!(&task.destination, Destination::Http { url } if !url.is_empty()) {
                return Err("destination URL is required".to_string());
            }
        }
    }
    if task.max_retries > MAX_RETRY_LIMIT {
        return Err(format!("max_retries must be between 0 and {MAX_RETRY_LIMIT}"));
    }
    if task.base_delay < MIN_BASE_DELAY || task.base_delay > MAX_BASE_DELAY {
        return Err(format!(
            "base_delay must be between {MIN_BASE_DELAY} and {MAX_BASE_DELAY}"
        ));
    }
    Ok(())
}
