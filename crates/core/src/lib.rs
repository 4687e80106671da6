//! Core domain for the redrive retry orchestrator.
//!
//! This crate holds the pieces that do not touch the network: the task
//! entity and its retry accounting, the destination model, validation,
//! the error taxonomy, the port traits implemented by adapters, and the
//! task service that drives the delivery/retry/dead-letter pipeline.

pub mod constants;
pub mod destination;
pub mod error;
pub mod ports;
pub mod service;
pub mod task;

pub use destination::{Destination, DestinationKind};
pub use error::{HealthError, ProduceError, SchedulerError, TaskError};
pub use ports::{HealthCheck, MessageProducer, TaskProcessor, TaskScheduler};
pub use service::{InitialDelay, TaskService};
pub use task::Task;
