pub mod handlers;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use sea_orm::DbErr;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response body.
///
/// All error responses share this structure; fields that do not apply to a
/// given error kind are omitted from the JSON. The three shapes clients see:
///
/// - validation failure (400): `timestamp`, `status`, `error`,
///   `validationErrors` (field name → violation message)
/// - not found (404): `error` only
/// - unexpected failure (500): `timestamp`, `status`, `error`, `details`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error label or message
    pub error: String,
    /// Field name → violation message, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
    /// Underlying message text, present on unexpected failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Body for a request-validation failure.
    pub fn validation(validation_errors: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: Some(Local::now().naive_local()),
            status: Some(StatusCode::BAD_REQUEST.as_u16()),
            error: "Validation Error".to_string(),
            validation_errors: Some(validation_errors),
            details: None,
        }
    }

    /// Body for a missing resource; carries only the message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            status: None,
            error: message.into(),
            validation_errors: None,
            details: None,
        }
    }

    /// Body for a rejected request that is not a field-validation failure.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Local::now().naive_local()),
            status: Some(StatusCode::BAD_REQUEST.as_u16()),
            error: message.into(),
            validation_errors: None,
            details: None,
        }
    }

    /// Body for an unexpected failure; the generic label with the underlying
    /// message in `details`.
    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Local::now().naive_local()),
            status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
            error: "An unexpected error occurred.".to_string(),
            validation_errors: None,
            details: Some(details.into()),
        }
    }
}

/// Flatten validator output into a field → message map.
///
/// Takes the first violation per field, preferring the configured message and
/// falling back to the violation code. Field names are converted to camelCase
/// to match the wire names the rest of the API serializes.
pub(crate) fn validation_error_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, violations)| {
            let message = violations
                .first()
                .map(|v| {
                    v.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| v.code.to_string())
                })
                .unwrap_or_else(|| "invalid value".to_string());
            (camel_case(field), message)
        })
        .collect()
}

/// Convert a snake_case Rust field identifier to its camelCase wire name.
///
/// The validator crate keys violations by the Rust identifier; response
/// bodies rename fields with serde, so the error map has to follow suit.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Application error type that can be converted to HTTP responses.
///
/// Integrates with common error types from dependencies and provides the
/// structured error bodies defined by [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::validation(validation_error_map(&e)),
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                (e.status(), ErrorResponse::bad_request(e.body_text()))
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg))
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal(e.to_string()),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}
