//! Error taxonomy.
//!
//! Ingress-facing errors (`Invalid`, `ScheduleFailed`) propagate to the
//! caller with a stable shape; background errors (fetch, delivery,
//! dead-letter, corrupt entries) are absorbed by the worker and logged.

use thiserror::Error;

/// Errors surfaced by the task service to its callers.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Validation rejection; never retried.
    #[error("invalid task: {0}")]
    Invalid(String),

    /// The store write failed; the task was never persisted.
    #[error("failed to schedule task: {0}")]
    ScheduleFailed(#[source] SchedulerError),

    /// The store read failed during polling.
    #[error("fetching due tasks: {0}")]
    FetchFailed(#[source] SchedulerError),
}

/// Errors from the scheduling store.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("serializing task: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(String),
}

/// Errors from message producers.
#[derive(Debug, Error)]
pub enum ProduceError {
    /// The destination does not carry the fields its producer needs.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("{0}")]
    Transport(String),

    /// Non-2xx HTTP response; `body` is a bounded prefix of the response.
    #[error("http request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Close(String),
}

/// A failed health probe.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HealthError(pub String);
