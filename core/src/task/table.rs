//! In-memory task table shared by the store implementations
//!
//! Mutations never touch the current state directly: they build the next
//! state, the store persists it, and only then is it committed and published.
//! A failed write therefore leaves the table and every subscriber untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::live::{LiveQuery, Subscriptions};
use super::model::{Task, TaskId, UNSAVED_ID};
use super::query::TaskQuery;
use crate::error::Error;
use crate::Result;

const FIRST_ID: TaskId = 1;

/// Tasks keyed by id plus the id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableState {
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            next_id: FIRST_ID,
            tasks: BTreeMap::new(),
        }
    }
}

impl TableState {
    pub(crate) fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        let mut state = Self::default();
        for task in tasks {
            state = state.upserted(task)?.0;
        }
        Ok(state)
    }

    pub(crate) fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Next state with `task` inserted or replaced, plus the stored task
    ///
    /// An unsaved task gets the next unused id. A task carrying an id the
    /// table has never seen is inserted under that id and the counter moves
    /// past it.
    pub(crate) fn upserted(&self, mut task: Task) -> Result<(Self, Task)> {
        let mut next = self.clone();
        if task.id == UNSAVED_ID {
            task.id = next.next_id;
        }
        let following = task
            .id
            .checked_add(1)
            .ok_or_else(|| Error::Storage("Task id space exhausted".to_string()))?;
        next.next_id = next.next_id.max(following);
        next.tasks.insert(task.id, task.clone());
        Ok((next, task))
    }

    /// Next state without the task with this id, or `None` if absent
    pub(crate) fn without(&self, id: TaskId) -> Option<Self> {
        if !self.tasks.contains_key(&id) {
            return None;
        }
        let mut next = self.clone();
        next.tasks.remove(&id);
        Some(next)
    }

    pub(crate) fn to_document(&self) -> TableDocument {
        TableDocument {
            next_id: self.next_id,
            tasks: self.tasks.values().cloned().collect(),
        }
    }

    pub(crate) fn from_document(document: TableDocument) -> Result<Self> {
        let mut tasks = BTreeMap::new();
        let mut next_id = document.next_id.max(FIRST_ID);
        for task in document.tasks {
            if task.id == UNSAVED_ID {
                return Err(Error::Storage(format!(
                    "Stored task '{}' has no id",
                    task.title
                )));
            }
            next_id = next_id.max(task.id.saturating_add(1));
            let id = task.id;
            if tasks.insert(id, task).is_some() {
                return Err(Error::Storage(format!("Duplicate stored task id {}", id)));
            }
        }
        Ok(Self { next_id, tasks })
    }
}

/// On-disk layout of the table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableDocument {
    #[serde(default)]
    next_id: TaskId,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Table state together with the live queries watching it
#[derive(Default)]
pub(crate) struct LiveTable {
    state: TableState,
    subscriptions: Subscriptions,
}

impl LiveTable {
    pub(crate) fn new(state: TableState) -> Self {
        Self {
            state,
            subscriptions: Subscriptions::default(),
        }
    }

    pub(crate) fn state(&self) -> &TableState {
        &self.state
    }

    /// Replace the state and notify every subscriber
    pub(crate) fn commit(&mut self, next: TableState) {
        self.state = next;
        self.subscriptions.publish(self.state.tasks.values());
    }

    pub(crate) fn subscribe(&mut self, query: TaskQuery) -> LiveQuery {
        self.subscriptions.register(query, self.state.tasks.values())
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }
}
