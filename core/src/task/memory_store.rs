//! In-memory task storage
//!
//! Same semantics as [`super::FileTaskStore`] without touching the disk.
//! Handy for demos and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::live::LiveQuery;
use super::model::{Task, TaskId};
use super::query::TaskQuery;
use super::repository::TaskRepository;
use super::table::{LiveTable, TableState};
use crate::Result;

#[derive(Default)]
pub struct InMemoryTaskStore {
    table: RwLock<LiveTable>,
}

impl InMemoryTaskStore {
    /// Start with the given tasks; unsaved ones get fresh ids
    pub fn with_seed(seed: impl IntoIterator<Item = Task>) -> Result<Self> {
        let state = TableState::from_tasks(seed)?;
        Ok(Self {
            table: RwLock::new(LiveTable::new(state)),
        })
    }

    /// Number of live queries currently attached
    pub async fn subscriber_count(&self) -> usize {
        self.table.read().await.subscriber_count()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn save(&self, task: Task) -> Result<Task> {
        let mut table = self.table.write().await;
        let (next, saved) = table.state().upserted(task)?;
        table.commit(next);
        debug!("Saved task {} in memory", saved.id);
        Ok(saved)
    }

    async fn delete(&self, task: &Task) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.state().without(task.id) {
            Some(next) => {
                table.commit(next);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.table.read().await.state().get(id).cloned())
    }

    async fn subscribe(&self, query: TaskQuery) -> LiveQuery {
        self.table.write().await.subscribe(query)
    }
}
