//! JSON error bodies for 404, 413 and 500 responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

/// The response for a request that referenced an expense ID that does not exist.
pub fn get_404_expense_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Expense not found" })),
    )
        .into_response()
}

pub fn get_500_internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal Server Error" })),
    )
        .into_response()
}

/// The response for a request whose body is larger than the server accepts.
pub fn get_413_payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(json!({ "detail": "Request body too large" })),
    )
        .into_response()
}
