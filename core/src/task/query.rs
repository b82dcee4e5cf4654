//! Query descriptors evaluated against the task table

use super::model::Task;

/// What a live subscription is watching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskQuery {
    /// Every task
    All,
    /// Tasks whose title contains the needle, ignoring case
    TitleContains(String),
}

impl TaskQuery {
    pub fn title_contains(needle: impl Into<String>) -> Self {
        Self::TitleContains(needle.into())
    }

    /// Whether a single task belongs in this query's result
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::TitleContains(needle) => task
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    /// Filter and order tasks: High before Medium before Low, ties by id
    pub fn evaluate<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        let mut result: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        result.sort_by_key(|task| (task.priority.rank(), task.id));
        result
    }
}
