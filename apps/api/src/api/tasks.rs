//! Tasks API routes

use axum::Router;
use domain_tasks::{handlers, PgTaskRepository, TaskService};

use crate::state::AppState;

/// Create the tasks router backed by Postgres
pub fn router(state: &AppState) -> Router {
    let repository = PgTaskRepository::new(state.db.clone());
    let service = TaskService::new(repository);
    handlers::router(service)
}
