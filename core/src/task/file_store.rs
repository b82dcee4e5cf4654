//! File-based task storage implementation
//!
//! Stores the task table as a single JSON document on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::live::LiveQuery;
use super::model::{Task, TaskId};
use super::query::TaskQuery;
use super::repository::TaskRepository;
use super::table::{LiveTable, TableDocument, TableState};
use crate::Result;

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Committed table and its live queries
    table: RwLock<LiveTable>,
}

impl FileTaskStore {
    /// Open the store at `path`
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let document: TableDocument = serde_json::from_str(&content)?;
            TableState::from_document(document)?
        } else {
            TableState::default()
        };

        info!("Opened task store at {} ({} tasks)", path.display(), state.len());
        Ok(Self {
            path,
            table: RwLock::new(LiveTable::new(state)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live queries currently attached
    pub async fn subscriber_count(&self) -> usize {
        self.table.read().await.subscriber_count()
    }

    /// Write `state` beside the tasks file, then rename it over the old one
    ///
    /// The rename swaps the whole file in one step: an interrupted write
    /// leaves the previous table in place, never a missing file.
    async fn persist(&self, state: &TableState) -> Result<()> {
        let json = serde_json::to_vec_pretty(&state.to_document())?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        tokio::fs::create_dir_all(dir).await?;

        let staging = dir.join(format!(".tasks-{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = replace_file(&staging, &self.path, &json).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn replace_file(staging: &Path, target: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(staging).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(staging, target).await
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn save(&self, task: Task) -> Result<Task> {
        let mut table = self.table.write().await;
        let (next, saved) = table.state().upserted(task)?;

        self.persist(&next).await?;
        table.commit(next);
        debug!("Saved task {} ({})", saved.id, saved.priority);
        Ok(saved)
    }

    async fn delete(&self, task: &Task) -> Result<bool> {
        let mut table = self.table.write().await;
        let Some(next) = table.state().without(task.id) else {
            debug!("Task {} not stored, nothing to delete", task.id);
            return Ok(false);
        };

        self.persist(&next).await?;
        table.commit(next);
        debug!("Deleted task {}", task.id);
        Ok(true)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let table = self.table.read().await;
        Ok(table.state().get(id).cloned())
    }

    async fn subscribe(&self, query: TaskQuery) -> LiveQuery {
        let mut table = self.table.write().await;
        table.subscribe(query)
    }
}
