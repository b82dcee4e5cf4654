//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::live::LiveQuery;
use super::model::{Task, TaskId};
use super::query::TaskQuery;
use crate::Result;

/// Durable task storage with live queries
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert or replace a task by id, returning the stored task
    ///
    /// An unsaved task is assigned a fresh id. Writes are atomic with
    /// respect to each other.
    async fn save(&self, task: Task) -> Result<Task>;

    /// Delete the task with the same id
    ///
    /// Returns `false` without touching the store if no such task exists.
    async fn delete(&self, task: &Task) -> Result<bool>;

    /// Get a task by id
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// Subscribe to a query; the initial snapshot is queued immediately
    async fn subscribe(&self, query: TaskQuery) -> LiveQuery;

    /// Every task, High priority first
    async fn list_all(&self) -> LiveQuery {
        self.subscribe(TaskQuery::All).await
    }

    /// Tasks whose title contains `needle`, ignoring case
    async fn search(&self, needle: &str) -> LiveQuery {
        self.subscribe(TaskQuery::title_contains(needle)).await
    }
}
