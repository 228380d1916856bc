//! SeaORM entity for the `tasks` table.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::models::{NewTask, Status, Task};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub case_number: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: Status,
    pub due_date: Option<NaiveDateTime>,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            case_number: model.case_number,
            title: model.title,
            description: model.description,
            status: model.status,
            due_date: model.due_date,
            date_created: model.date_created,
            date_updated: model.date_updated,
        }
    }
}

// Timestamps stay NotSet here; the repository fills them at insert time.
impl From<NewTask> for ActiveModel {
    fn from(task: NewTask) -> Self {
        Self {
            id: NotSet,
            case_number: Set(task.case_number),
            title: Set(task.title),
            description: Set(task.description),
            status: Set(task.status),
            due_date: Set(task.due_date),
            date_created: NotSet,
            date_updated: NotSet,
        }
    }
}
