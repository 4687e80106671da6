use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app::dto::HealthResponse;
use crate::app::AppState;

/// `GET /health`: run every registered probe and report the aggregate.
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Response {
    let mut checks = BTreeMap::new();
    let mut healthy = true;

    for check in &state.health_checks {
        match check.check().await {
            Ok(()) => {
                checks.insert(check.name().to_string(), "ok".to_string());
            }
            Err(err) => {
                healthy = false;
                checks.insert(check.name().to_string(), err.to_string());
            }
        }
    }

    let (status, label) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (status, Json(HealthResponse { status: label, checks })).into_response()
}
