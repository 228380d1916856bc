use async_trait::async_trait;
use chrono::Local;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::entity;
use crate::error::TaskResult;
use crate::models::{NewTask, Task};
use crate::repository::TaskRepository;

/// PostgreSQL-backed task repository
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all_ordered_by_updated_desc(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::DateUpdated)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Task::from))
    }

    async fn insert(&self, task: NewTask) -> TaskResult<Task> {
        let now = Local::now().naive_local();
        let mut active = entity::ActiveModel::from(task);
        active.date_created = Set(now);
        active.date_updated = Set(now);

        let model = active.insert(&self.db).await?;
        info!("Inserted task: {} ({})", model.id, model.case_number);
        Ok(model.into())
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let active = entity::ActiveModel {
            id: Set(task.id),
            case_number: Set(task.case_number),
            title: Set(task.title),
            description: Set(task.description),
            status: Set(task.status),
            due_date: Set(task.due_date),
            date_created: Set(task.date_created),
            date_updated: Set(Local::now().naive_local()),
        };

        let model = active.update(&self.db).await?;
        info!("Saved task: {}", model.id);
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        info!("Deleted task {}: {} rows affected", id, result.rows_affected);
        Ok(())
    }
}
