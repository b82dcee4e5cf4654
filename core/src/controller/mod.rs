//! Presentation state controller
//!
//! The single state hub a presentation layer observes. It mirrors the live
//! task list, reports the outcome of every save and delete as a one-shot
//! event, and runs the debounced search. Nothing it exposes can fail: store
//! errors are turned into [`OperationOutcome::Failure`] events.

mod outcome;
mod search;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use crate::service::TaskService;
use crate::task::Task;

pub use outcome::OperationOutcome;
pub use search::SearchResults;

use outcome::Operation;
use search::SearchWorker;

/// Controller tuning
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long the search query must stay unchanged before it runs
    pub search_debounce: Duration,
    /// Outcome events buffered for a slow observer before it starts lagging
    pub outcome_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            outcome_capacity: 64,
        }
    }
}

pub struct TaskController {
    service: TaskService,
    current_tasks: Arc<watch::Sender<Arc<Vec<Task>>>>,
    outcomes: broadcast::Sender<OperationOutcome>,
    search_query: watch::Sender<String>,
    search_results: Arc<watch::Sender<SearchResults>>,
    workers: Vec<AbortHandle>,
    /// Cloned into every accepted mutation and dropped when it has reported
    pending: Option<mpsc::Sender<()>>,
    settled: mpsc::Receiver<()>,
}

impl TaskController {
    /// Start the controller's background workers
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(service: TaskService, config: ControllerConfig) -> Self {
        let current_tasks = Arc::new(watch::channel(Arc::new(Vec::new())).0);
        let (outcomes, _) = broadcast::channel(config.outcome_capacity.max(1));
        let (search_query, query_rx) = watch::channel(String::new());
        let search_results = Arc::new(watch::channel(SearchResults::default()).0);
        let (pending, settled) = mpsc::channel(1);

        let list_worker = tokio::spawn(mirror_all_tasks(service.clone(), current_tasks.clone()));
        let search_worker = tokio::spawn(
            SearchWorker {
                service: service.clone(),
                debounce: config.search_debounce,
                query_rx,
                results_tx: search_results.clone(),
            }
            .run(),
        );

        Self {
            service,
            current_tasks,
            outcomes,
            search_query,
            search_results,
            workers: vec![list_worker.abort_handle(), search_worker.abort_handle()],
            pending: Some(pending),
            settled,
        }
    }

    /// Every task, High priority first; replaced wholesale on each change
    pub fn current_tasks(&self) -> watch::Receiver<Arc<Vec<Task>>> {
        self.current_tasks.subscribe()
    }

    /// Outcome events from now on; earlier events are not replayed
    pub fn outcomes(&self) -> broadcast::Receiver<OperationOutcome> {
        self.outcomes.subscribe()
    }

    pub fn search_query(&self) -> String {
        self.search_query.borrow().clone()
    }

    /// Change the search text; results follow once it has been quiet
    pub fn set_search_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.search_query.send_if_modified(|current| {
            if *current == text {
                return false;
            }
            *current = text;
            true
        });
    }

    pub fn search_results(&self) -> watch::Receiver<SearchResults> {
        self.search_results.subscribe()
    }

    /// Insert or update a task in the background
    ///
    /// The outcome is reported on [`Self::outcomes`]; the handle only tells
    /// when that has happened.
    pub fn save_task(&self, task: Task) -> JoinHandle<()> {
        let service = self.service.clone();
        let outcomes = self.outcomes.clone();
        self.dispatch(async move {
            let outcome = match service.save_task(task).await {
                Ok(saved) => {
                    debug!("Task {} saved", saved.id);
                    OperationOutcome::Success
                }
                Err(e) => {
                    warn!("Failed to save task: {}", e);
                    OperationOutcome::failed(Operation::Save, &e)
                }
            };
            let _ = outcomes.send(outcome);
        })
    }

    /// Delete a task in the background; deleting an unknown task succeeds
    pub fn delete_task(&self, task: Task) -> JoinHandle<()> {
        let service = self.service.clone();
        let outcomes = self.outcomes.clone();
        self.dispatch(async move {
            let outcome = match service.delete_task(&task).await {
                Ok(removed) => {
                    debug!("Task {} deleted (present: {})", task.id, removed);
                    OperationOutcome::Success
                }
                Err(e) => {
                    warn!("Failed to delete task {}: {}", task.id, e);
                    OperationOutcome::failed(Operation::Delete, &e)
                }
            };
            let _ = outcomes.send(outcome);
        })
    }

    /// Stop the list and search workers, then wait for accepted mutations
    ///
    /// Saves and deletes already handed to the controller run to completion
    /// and report their outcome before this returns.
    pub async fn shutdown(mut self) {
        self.stop_workers();
        self.pending = None;
        // Yields `None` once the last mutation has dropped its sender
        let _ = self.settled.recv().await;
    }

    fn stop_workers(&self) {
        for worker in &self.workers {
            worker.abort();
        }
    }

    fn dispatch<F>(&self, operation: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let pending = self.pending.clone();
        tokio::spawn(async move {
            operation.await;
            drop(pending);
        })
    }
}

impl Drop for TaskController {
    fn drop(&mut self) {
        // Mutations are left running so a write is never cut short
        self.stop_workers();
    }
}

async fn mirror_all_tasks(service: TaskService, current_tasks: Arc<watch::Sender<Arc<Vec<Task>>>>) {
    let mut live = service.all_tasks().await;
    while let Some(tasks) = live.next().await {
        current_tasks.send_replace(Arc::new(tasks));
    }
    warn!("Task list subscription closed by the store");
}
