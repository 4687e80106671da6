//! HTTP ingress wiring (axum router + application state).
//!
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: the standard error payload

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use redrive_core::{HealthCheck, TaskService};

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared state injected into every handler.
pub struct AppState {
    pub tasks: Arc<TaskService>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/tasks", post(routes::tasks::create))
        .route("/health", get(routes::system::health))
        .layer(Extension(Arc::new(state)))
}
