use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors produced by the tasks domain
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found with id {0}")]
    NotFound(i64),

    #[error("Invalid status '{0}'")]
    InvalidStatus(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => AppError::NotFound(err.to_string()),
            TaskError::InvalidStatus(_) => AppError::BadRequest(err.to_string()),
            TaskError::Database(details) => AppError::InternalServerError(details),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_the_id() {
        assert_eq!(
            TaskError::NotFound(42).to_string(),
            "Task not found with id 42"
        );
    }

    #[test]
    fn test_invalid_status_maps_to_bad_request() {
        let err = AppError::from(TaskError::InvalidStatus("BOGUS".to_string()));
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err = AppError::from(TaskError::NotFound(7));
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Task not found with id 7"));
    }
}
