//! Task model definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on first insert
pub type TaskId = u64;

/// Id carried by a task that has never been saved
pub const UNSAVED_ID: TaskId = 0;

/// Task priority level
///
/// Lists are ordered by [`TaskPriority::rank`], so `High` tasks come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    #[serde(alias = "HIGH", alias = "high")]
    High,
    #[serde(alias = "MEDIUM", alias = "medium")]
    Medium,
    #[serde(alias = "LOW", alias = "low")]
    Low,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::High, Self::Medium, Self::Low];

    /// Sort rank: High=1, Medium=2, Low=3
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no priority level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority '{}' (expected high, medium or low)", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

impl FromStr for TaskPriority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPriority(trimmed.to_string()))
    }
}

/// A to-do item
///
/// Two tasks are the same item when their ids match; they have the same
/// content when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl Task {
    /// Create an unsaved task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            is_completed: false,
            priority: TaskPriority::default(),
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the completion flag
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Whether the store has assigned this task an id
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new("Buy milk");
        assert_eq!(task.id, UNSAVED_ID);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.is_persisted());
    }

    #[test]
    fn test_task_builders() {
        let task = Task::new("Call bank")
            .with_priority(TaskPriority::High)
            .completed(true);
        assert_eq!(task.priority, TaskPriority::High);
        assert!(task.is_completed);
    }

    #[test]
    fn test_priority_rank_orders_high_first() {
        assert!(TaskPriority::High.rank() < TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() < TaskPriority::Low.rank());
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!(" medium ".parse::<TaskPriority>(), Ok(TaskPriority::Medium));
        assert_eq!("Low".parse::<TaskPriority>(), Ok(TaskPriority::Low));
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_task_serialization_format() {
        let mut task = Task::new("Write report").with_priority(TaskPriority::Low);
        task.id = 7;

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["priority"], "Low");

        let legacy: Task =
            serde_json::from_str(r#"{"id":3,"title":"Old","priority":"HIGH"}"#).unwrap();
        assert_eq!(legacy.priority, TaskPriority::High);
        assert!(!legacy.is_completed);
    }

    #[test]
    fn test_content_equality_includes_every_field() {
        let a = Task::new("Same");
        let b = a.clone().completed(true);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
