//! Readiness endpoint

use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    service: String,
    version: String,
}

/// Readiness probe: verifies the database connection is usable.
async fn ready(state: AppState) -> Result<Json<ReadyResponse>, StatusCode> {
    if let Err(e) = database::postgres::check_health(&state.db).await {
        warn!("Readiness check failed: {}", e);
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
        service: state.config.app.name.to_string(),
        version: state.config.app.version.to_string(),
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}
