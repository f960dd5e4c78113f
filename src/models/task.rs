use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Every status may follow every other; there is no terminal state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    #[sqlx(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    #[sqlx(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| AppError::Validation("Invalid status value".into()))
    }
}

/// A task together with the title of the project that owns it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Owning project. Fixed for the lifetime of the task.
    pub project_id: i32,
    /// Title of the owning project.
    pub project: String,
}

/// Request body for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title, description, and project_id are required"
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title, description, and project_id are required"))]
    pub description: String,
    pub project_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("To Do".parse::<TaskStatus>().unwrap(), TaskStatus::ToDo);
        assert_eq!(
            "In Progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "Completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );

        for invalid in ["", "to_do", "done", "completed", "In progress"] {
            assert!(
                matches!(invalid.parse::<TaskStatus>(), Err(AppError::Validation(_))),
                "{:?} should be rejected",
                invalid
            );
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(TaskStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_task_input_validation() {
        let input: TaskInput =
            serde_json::from_str(r#"{"title": "T1", "project_id": 1}"#).unwrap();
        assert!(input.validate().is_err());

        let input = TaskInput {
            title: "T1".to_string(),
            description: "desc".to_string(),
            project_id: Some(1),
        };
        assert!(input.validate().is_ok());
    }
}
