use chrono::{Local, NaiveDateTime};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::TaskError;

/// Task lifecycle status
///
/// Closed set; the wire names (`PENDING`, `IN_PROGRESS`, `COMPLETED`) are an
/// external contract.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Initial state of every created task
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl Status {
    /// Parse a status name against the closed status set.
    ///
    /// Total over its input: unrecognized names come back as
    /// [`TaskError::InvalidStatus`], never a panic.
    pub fn parse(value: &str) -> Result<Self, TaskError> {
        value
            .parse()
            .map_err(|_| TaskError::InvalidStatus(value.to_string()))
    }
}

/// Serde support for the `yyyy-MM-ddTHH:mm` wire format used by `dueDate`.
///
/// Output is always minute precision; input may carry seconds.
pub mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(value: &str) -> chrono::ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(value, FORMAT))
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|value| super::parse(&value).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Task entity - a persisted task row
///
/// Timestamps are store-managed: `date_created` is set once at insert,
/// `date_updated` is refreshed on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Generated case number, `CASE-` plus six digits; not checked for
    /// uniqueness
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    #[serde(default, with = "minute_format::option")]
    #[schema(value_type = Option<String>, example = "2099-01-01T00:00")]
    pub due_date: Option<NaiveDateTime>,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
}

/// A task that has not been persisted yet
///
/// The store assigns `id` and both timestamps on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub due_date: Option<NaiveDateTime>,
}

/// Request object for creating a task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Finish report")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Complete the financial report by Tuesday")]
    pub description: Option<String>,
    /// Accepted for wire compatibility but ignored: every created task
    /// starts PENDING.
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, with = "minute_format::option")]
    #[validate(custom(function = "validate_future_due_date"))]
    #[schema(value_type = Option<String>, example = "2099-01-01T00:00")]
    pub due_date: Option<NaiveDateTime>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Title is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_future_due_date(due_date: &NaiveDateTime) -> Result<(), ValidationError> {
    if *due_date <= Local::now().naive_local() {
        let mut err = ValidationError::new("future");
        err.message = Some("Due date must be in the future".into());
        return Err(err);
    }
    Ok(())
}

/// Response object for task operations
///
/// Read projection of [`Task`] omitting the internal timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub case_number: String,
    pub description: Option<String>,
    pub status: Status,
    #[serde(default, with = "minute_format::option")]
    #[schema(value_type = Option<String>, example = "2099-01-01T00:00")]
    pub due_date: Option<NaiveDateTime>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            case_number: task.case_number,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
        }
    }
}

/// Query parameters for the status-update endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UpdateStatusParams {
    /// New status name, e.g. `COMPLETED`
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_accepts_wire_names() {
        assert_eq!(Status::parse("PENDING").unwrap(), Status::Pending);
        assert_eq!(Status::parse("IN_PROGRESS").unwrap(), Status::InProgress);
        assert_eq!(Status::parse("COMPLETED").unwrap(), Status::Completed);
    }

    #[test]
    fn test_status_parse_rejects_unknown_names() {
        let err = Status::parse("NOT_A_STATUS").unwrap_err();
        assert!(matches!(err, TaskError::InvalidStatus(ref s) if s == "NOT_A_STATUS"));
    }

    #[test]
    fn test_status_display_matches_wire_names() {
        assert_eq!(Status::InProgress.to_string(), "IN_PROGRESS");
    }

    #[test]
    fn test_minute_format_parses_with_and_without_seconds() {
        let minute = minute_format::parse("2099-01-01T00:00").unwrap();
        let seconds = minute_format::parse("2099-01-01T00:00:00").unwrap();
        assert_eq!(minute, seconds);
        assert!(minute_format::parse("not-a-date").is_err());
    }

    #[test]
    fn test_due_date_round_trips_at_minute_precision() {
        let json = r#"{"title":"Finish report","dueDate":"2099-01-01T00:00"}"#;
        let request: TaskRequest = serde_json::from_str(json).unwrap();
        let due_date = request.due_date.unwrap();
        assert_eq!(due_date.format(minute_format::FORMAT).to_string(), "2099-01-01T00:00");
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let json = r#"{"title":"T","id":99,"createdDate":"2020-01-01T00:00"}"#;
        let request: TaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "T");
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let request = TaskRequest {
            title: "   ".to_string(),
            description: None,
            status: None,
            due_date: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_past_due_date_fails_validation() {
        let request = TaskRequest {
            title: "T".to_string(),
            description: None,
            status: None,
            due_date: minute_format::parse("2000-01-01T00:00").ok(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("due_date"));
    }
}
