use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, ValidatedJson};
use chrono::Local;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{Status, Task, TaskRequest, TaskResponse, UpdateStatusParams};
use crate::repository::TaskRepository;
use crate::service::TaskService;

const TAG: &str = "tasks";

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_all_tasks,
        create_task,
        get_example_case,
        get_task,
        update_task_status,
        delete_task,
    ),
    components(schemas(Task, TaskRequest, TaskResponse, Status, ErrorResponse)),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the tasks router with all HTTP endpoints
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_all_tasks).post(create_task))
        .route("/get-example-case", get(get_example_case))
        .route(
            "/{id}",
            get(get_task).put(update_task_status).delete(delete_task),
        )
        .with_state(shared_service)
}

/// List all tasks, most recently updated first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of tasks", body = Vec<TaskResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_all_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.get_all_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = TaskResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// Get a canned example task
///
/// Returns a fixed COMPLETED task; handy for clients exploring the API shape.
#[utoipa::path(
    get,
    path = "/get-example-case",
    tag = TAG,
    responses(
        (status = 200, description = "Example task", body = Task)
    )
)]
async fn get_example_case() -> Json<Task> {
    let now = Local::now().naive_local();
    Json(Task {
        id: 1,
        case_number: "ABC12345".to_string(),
        title: "Case Title".to_string(),
        description: Some("Case Description".to_string()),
        status: Status::Completed,
        due_date: Some(now),
        date_created: now,
        date_updated: now,
    })
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.get_task_by_id(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Update a task's status
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID"),
        UpdateStatusParams
    ),
    responses(
        (status = 200, description = "Task status updated", body = TaskResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_task_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
    Query(params): Query<UpdateStatusParams>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.update_task_status(id, &params.status).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Delete a task
///
/// Deleting an absent id still returns 204.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<impl IntoResponse> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
