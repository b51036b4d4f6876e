use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MoodtaskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Low(1) < Medium(2) < High(3). Doubles as the Happy-mood score bonus.
    pub fn rank(&self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Three-state flag. Any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "todo" => Some(Self::Todo),
            "in progress" | "inprogress" => Some(Self::InProgress),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub importance: i32,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub reorganizable: bool,
    #[serde(default)]
    pub strict: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Payload for creating a task. The storage collaborator assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub importance: i32,
    pub progress: i32,
    pub reorganizable: bool,
    pub strict: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), MoodtaskError> {
        if self.title.trim().is_empty() {
            return Err(MoodtaskError::validation("Task title must not be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(MoodtaskError::validation("Task category must not be empty"));
        }
        validate_importance(self.importance)?;
        validate_progress(self.progress)
    }
}

/// Partial update: only `Some` fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorganizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.importance.is_none()
            && self.progress.is_none()
            && self.reorganizable.is_none()
            && self.strict.is_none()
            && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<(), MoodtaskError> {
        if self.is_empty() {
            return Err(MoodtaskError::validation("Nothing to update"));
        }
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(MoodtaskError::validation("Task title must not be empty"));
            }
        }
        if let Some(importance) = self.importance {
            validate_importance(importance)?;
        }
        if let Some(progress) = self.progress {
            validate_progress(progress)?;
        }
        Ok(())
    }
}

fn validate_importance(importance: i32) -> Result<(), MoodtaskError> {
    if !(1..=10).contains(&importance) {
        return Err(MoodtaskError::validation(format!(
            "Importance must be between 1 and 10 (got {importance})"
        )));
    }
    Ok(())
}

fn validate_progress(progress: i32) -> Result<(), MoodtaskError> {
    if !(0..=100).contains(&progress) {
        return Err(MoodtaskError::validation(format!(
            "Progress must be between 0 and 100 (got {progress})"
        )));
    }
    Ok(())
}
