use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::TaskResult;
use crate::models::{NewTask, Task};

/// Storage contract for tasks
///
/// Implementations own the timestamps: [`insert`](TaskRepository::insert)
/// sets `date_created` and `date_updated`, [`save`](TaskRepository::save)
/// refreshes `date_updated` on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, most recently updated first
    async fn find_all_ordered_by_updated_desc(&self) -> TaskResult<Vec<Task>>;

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Persist a new task, assigning its id and both timestamps
    async fn insert(&self, task: NewTask) -> TaskResult<Task>;

    /// Persist the full row of an existing task, refreshing `date_updated`
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Remove a task; deleting an absent id is not an error
    async fn delete_by_id(&self, id: i64) -> TaskResult<()>;
}

/// In-memory task repository for testing and local development
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<i64, Task>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_all_ordered_by_updated_desc(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by(|a, b| b.date_updated.cmp(&a.date_updated));
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn insert(&self, task: NewTask) -> TaskResult<Task> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Local::now().naive_local();
        let task = Task {
            id,
            case_number: task.case_number,
            title: task.title,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
            date_created: now,
            date_updated: now,
        };

        let mut tasks = self.tasks.write().await;
        tasks.insert(id, task.clone());
        info!("Inserted task: {} ({})", task.id, task.case_number);
        Ok(task)
    }

    async fn save(&self, mut task: Task) -> TaskResult<Task> {
        task.date_updated = Local::now().naive_local();

        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        info!("Saved task: {}", task.id);
        Ok(task)
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks.remove(&id);
        info!("Deleted task: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            case_number: "CASE-123456".to_string(),
            title: title.to_string(),
            description: None,
            status: Status::Pending,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert(new_task("first")).await.unwrap();
        let second = repo.insert(new_task("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.date_created, first.date_updated);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_unknown_id() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_refreshes_date_updated_and_reorders_listing() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert(new_task("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.insert(new_task("second")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let saved = repo.save(first.clone()).await.unwrap();
        assert!(saved.date_updated > first.date_updated);

        let all = repo.find_all_ordered_by_updated_desc().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert(new_task("doomed")).await.unwrap();

        repo.delete_by_id(task.id).await.unwrap();
        repo.delete_by_id(task.id).await.unwrap();

        assert!(repo.find_by_id(task.id).await.unwrap().is_none());
    }
}
