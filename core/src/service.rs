//! Task service
//!
//! Thin policy layer between the presentation controller and a store. It
//! holds no state of its own.

use std::sync::Arc;

use crate::task::{LiveQuery, Task, TaskRepository};
use crate::Result;

#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn save_task(&self, task: Task) -> Result<Task> {
        self.repository.save(task).await
    }

    pub async fn delete_task(&self, task: &Task) -> Result<bool> {
        self.repository.delete(task).await
    }

    pub async fn all_tasks(&self) -> LiveQuery {
        self.repository.list_all().await
    }

    /// Live search; a blank query lists every task
    pub async fn search(&self, query: &str) -> LiveQuery {
        if query.trim().is_empty() {
            self.repository.list_all().await
        } else {
            self.repository.search(query).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{InMemoryTaskStore, TaskPriority, TaskQuery};

    async fn service_with(titles: &[&str]) -> TaskService {
        let store = InMemoryTaskStore::with_seed(titles.iter().map(|t| Task::new(*t))).unwrap();
        TaskService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_blank_query_lists_everything() {
        let service = service_with(&["Buy milk", "Call bank"]).await;

        for blank in ["", "   ", "\t\n"] {
            let mut live = service.search(blank).await;
            assert_eq!(live.query(), &TaskQuery::All);
            assert_eq!(live.next().await.unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_query_is_passed_through_untrimmed() {
        let service = service_with(&["Buy milk", "milkshake"]).await;

        let mut live = service.search(" milk").await;
        assert_eq!(live.query(), &TaskQuery::title_contains(" milk"));
        let found = live.next().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Buy milk");
    }

    #[tokio::test]
    async fn test_unmatched_query_is_empty() {
        let service = service_with(&["Buy milk"]).await;
        let mut live = service.search("xyz").await;
        assert!(live.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_delete_delegate() {
        let service = service_with(&[]).await;
        let mut all = service.all_tasks().await;
        assert!(all.next().await.unwrap().is_empty());

        let saved = service
            .save_task(Task::new("Call bank").with_priority(TaskPriority::High))
            .await
            .unwrap();
        assert_eq!(all.next().await.unwrap(), vec![saved.clone()]);

        assert!(service.delete_task(&saved).await.unwrap());
        assert!(all.next().await.unwrap().is_empty());
        assert!(!service.delete_task(&saved).await.unwrap());
    }
}
