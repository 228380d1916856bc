//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{validation_error_map, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the request body, then validates it using the `validator`
/// crate's `Validate` trait. Constraint violations produce a 400 response
/// with a `validationErrors` map of field name → message.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateNote {
///     #[validate(length(min = 1, message = "Title is required"))]
///     title: String,
/// }
///
/// async fn create_note(ValidatedJson(payload): ValidatedJson<CreateNote>) -> String {
///     payload.title
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        data.validate().map_err(|e| {
            tracing::info!("Request validation failed: {:?}", e);
            let body = ErrorResponse::validation(validation_error_map(&e));
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
