use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::ErrorResponse;

/// Build a JSON error response with the standard payload shape.
pub fn json_error(status: StatusCode, code: &'static str, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code,
        }),
    )
        .into_response()
}
