use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ErrorResponse;

/// Handler for 404 Not Found errors.
///
/// Use as a fallback handler in the router for unmatched paths.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::not_found(
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
