//! Add/edit form validation
//!
//! Nothing reaches the controller until the form is well formed.

use taskify_core::task::{Task, TaskPriority};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    BlankTitle,

    #[error("Choose a priority: high, medium or low")]
    MissingPriority,
}

/// What the user typed into the add/edit form
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub priority: Option<TaskPriority>,
}

impl TaskForm {
    /// Form for a new task
    pub fn new(title: impl Into<String>, priority: Option<TaskPriority>) -> Self {
        Self {
            title: title.into(),
            priority,
        }
    }

    /// Form pre-filled from an existing task
    pub fn editing(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            priority: Some(task.priority),
        }
    }

    /// Build a new task from the form
    pub fn to_new_task(&self) -> Result<Task, ValidationError> {
        let (title, priority) = self.validate()?;
        Ok(Task::new(title).with_priority(priority))
    }

    /// Apply the form to an existing task, keeping its id and completion
    pub fn apply_to(&self, task: &Task) -> Result<Task, ValidationError> {
        let (title, priority) = self.validate()?;
        let mut updated = task.clone();
        updated.title = title;
        updated.priority = priority;
        Ok(updated)
    }

    fn validate(&self) -> Result<(String, TaskPriority), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        let priority = self.priority.ok_or(ValidationError::MissingPriority)?;
        Ok((title.to_string(), priority))
    }
}
