use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Status, Task, TaskRequest};
use crate::repository::TaskRepository;

const CASE_NUMBER_DIGITS: usize = 6;

/// Generate a case number of the form `CASE-` followed by six random digits.
///
/// Numbers are not checked for uniqueness.
fn generate_case_number() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..CASE_NUMBER_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("CASE-{digits}")
}

/// Business logic for the tasks domain
///
/// Generic over the repository so handlers can run against Postgres in
/// production and the in-memory store in tests.
#[derive(Debug, Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a task from a validated request.
    ///
    /// Any status in the request is ignored; created tasks always start
    /// PENDING with a freshly generated case number.
    pub async fn create_task(&self, request: TaskRequest) -> TaskResult<Task> {
        let task = NewTask {
            case_number: generate_case_number(),
            title: request.title,
            description: request.description,
            status: Status::Pending,
            due_date: request.due_date,
        };

        let task = self.repository.insert(task).await?;
        info!("Created task {} ({})", task.id, task.case_number);
        Ok(task)
    }

    pub async fn get_task_by_id(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    pub async fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.find_all_ordered_by_updated_desc().await
    }

    /// Change a task's status.
    ///
    /// The task is looked up before the status name is parsed, so an unknown
    /// id wins over an invalid status when both apply.
    pub async fn update_task_status(&self, id: i64, status: &str) -> TaskResult<Task> {
        let mut task = self.get_task_by_id(id).await?;
        task.status = Status::parse(status)?;

        let task = self.repository.save(task).await?;
        info!("Updated task {} status to {}", task.id, task.status);
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockTaskRepository;

    fn sample_task(id: i64) -> Task {
        let now = Local::now().naive_local();
        Task {
            id,
            case_number: "CASE-123456".to_string(),
            title: "Finish report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: Status::Pending,
            due_date: None,
            date_created: now,
            date_updated: now,
        }
    }

    fn sample_request() -> TaskRequest {
        TaskRequest {
            title: "Finish report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: None,
            due_date: None,
        }
    }

    #[test]
    fn test_case_number_format() {
        let case_number = generate_case_number();
        assert_eq!(case_number.len(), 11);
        assert!(case_number.starts_with("CASE-"));
        assert!(case_number[5..].chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_create_task_starts_pending_with_generated_case_number() {
        let mut repo = MockTaskRepository::new();
        repo.expect_insert().returning(|new_task| {
            let now = Local::now().naive_local();
            Ok(Task {
                id: 1,
                case_number: new_task.case_number,
                title: new_task.title,
                description: new_task.description,
                status: new_task.status,
                due_date: new_task.due_date,
                date_created: now,
                date_updated: now,
            })
        });

        let service = TaskService::new(repo);
        let mut request = sample_request();
        request.status = Some(Status::Completed);

        let task = service.create_task(request).await.unwrap();

        assert_eq!(task.status, Status::Pending);
        assert!(task.case_number.starts_with("CASE-"));
        assert_eq!(task.case_number.len(), 11);
    }

    #[tokio::test]
    async fn test_get_task_by_id_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = TaskService::new(repo);
        let err = service.get_task_by_id(42).await.unwrap_err();

        assert_eq!(err.to_string(), "Task not found with id 42");
    }

    #[tokio::test]
    async fn test_update_task_status_only_changes_status() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_task(id))));
        repo.expect_save().returning(|task| Ok(task));

        let service = TaskService::new(repo);
        let task = service.update_task_status(1, "COMPLETED").await.unwrap();

        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.title, "Finish report");
        assert_eq!(task.case_number, "CASE-123456");
    }

    #[tokio::test]
    async fn test_update_task_status_invalid_name_does_not_save() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_task(id))));
        repo.expect_save().times(0);

        let service = TaskService::new(repo);
        let err = service.update_task_status(1, "NOT_A_STATUS").await.unwrap_err();

        assert!(matches!(err, TaskError::InvalidStatus(ref s) if s == "NOT_A_STATUS"));
    }

    #[tokio::test]
    async fn test_update_task_status_unknown_id_wins_over_invalid_status() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let service = TaskService::new(repo);
        let err = service.update_task_status(99, "NOT_A_STATUS").await.unwrap_err();

        assert!(matches!(err, TaskError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_task_delegates_to_repository() {
        let mut repo = MockTaskRepository::new();
        repo.expect_delete_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));

        let service = TaskService::new(repo);
        service.delete_task(5).await.unwrap();
    }
}
