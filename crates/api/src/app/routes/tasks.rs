use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use redrive_core::TaskError;

use crate::app::dto::{CreateTaskRequest, CreateTaskResponse};
use crate::app::{errors, AppState};

/// `POST /tasks`
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return errors::json_error(StatusCode::BAD_REQUEST, "INVALID_BODY", "invalid request body");
    };

    let task = match request.into_task() {
        Ok(task) => task,
        Err(message) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("invalid task: {message}"),
            )
        }
    };

    let task_id = task.id.clone();
    match state.tasks.create_task(task).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(CreateTaskResponse {
                message: format!("Task {task_id} scheduled successfully"),
            }),
        )
            .into_response(),
        Err(err @ TaskError::Invalid(_)) => {
            errors::json_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        Err(err) => {
            error!(error = %err, "failed to create task");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
        }
    }
}
