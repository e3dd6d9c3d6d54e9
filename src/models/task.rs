use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Identifier assigned by the database.
    pub id: i64,
    /// What needs doing. Never empty.
    pub description: String,
    /// Completion flag, exposed as `status` on the wire.
    #[serde(rename = "status")]
    pub completed: bool,
    /// Identifier of the user who owns the task. Fixed at creation.
    pub user_id: i64,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1))]
    pub description: String,

    /// Defaults to `false` when omitted.
    #[serde(rename = "status", default)]
    pub completed: Option<bool>,
}

/// Body of `PUT /api/tasks/{id}`.
///
/// The description is required; an omitted `status` leaves the stored flag as it was.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1))]
    pub description: String,

    #[serde(rename = "status", default)]
    pub completed: Option<bool>,
}

/// Body of `GET /api/tasks`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

/// Body returned by create and update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskId {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_validation() {
        let valid_input = CreateTaskRequest {
            description: "buy milk".to_string(),
            completed: None,
        };
        assert!(valid_input.validate().is_ok());

        let invalid_input = CreateTaskRequest {
            description: "".to_string(),
            completed: Some(true),
        };
        assert!(invalid_input.validate().is_err());

        let invalid_update = UpdateTaskRequest {
            description: "".to_string(),
            completed: None,
        };
        assert!(invalid_update.validate().is_err());
    }

    #[test]
    fn test_status_field_is_optional() {
        let input: CreateTaskRequest =
            serde_json::from_str(r#"{ "description": "buy milk" }"#).unwrap();
        assert_eq!(input.completed, None);

        let input: UpdateTaskRequest =
            serde_json::from_str(r#"{ "description": "buy milk", "status": true }"#).unwrap();
        assert_eq!(input.completed, Some(true));
    }

    #[test]
    fn test_description_is_required() {
        let result = serde_json::from_str::<CreateTaskRequest>(r#"{ "status": true }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_task_serializes_completion_as_status() {
        let now = Utc::now();
        let task = Task {
            id: 1,
            description: "buy milk".to_string(),
            completed: false,
            user_id: 1,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["description"], "buy milk");
        assert_eq!(json["user_id"], 1);
        assert!(json.get("completed").is_none());
    }
}
