//! Debounced, latest-wins search
//!
//! One worker per controller drives the pipeline:
//!
//! ```text
//! query change ──► quiet timer (re)armed ──► timer fires
//!                                              │ same query as active? ─► ignore
//!                                              ▼
//!                          drop active LiveQuery, subscribe to the new one
//!                                              │
//!                          snapshots ──► search results
//! ```
//!
//! Only the current `LiveQuery` is ever polled and the previous one is
//! dropped before the next is opened, so results for a stale query can never
//! be delivered after a fresher one.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::service::TaskService;
use crate::task::{LiveQuery, Task};

/// Latest results of the debounced search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Query these results were computed for
    pub query: String,
    pub tasks: Arc<Vec<Task>>,
}

pub(crate) struct SearchWorker {
    pub(crate) service: TaskService,
    pub(crate) debounce: Duration,
    pub(crate) query_rx: watch::Receiver<String>,
    pub(crate) results_tx: Arc<watch::Sender<SearchResults>>,
}

impl SearchWorker {
    pub(crate) async fn run(mut self) {
        // The initial query counts as input, just like any later change.
        let mut deadline = Some(Instant::now() + self.debounce);
        let mut active: Option<LiveQuery> = None;
        let mut active_query: Option<String> = None;

        loop {
            tokio::select! {
                changed = self.query_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    deadline = Some(Instant::now() + self.debounce);
                }
                _ = quiet_period(deadline) => {
                    deadline = None;
                    let query = self.query_rx.borrow_and_update().clone();
                    if active_query.as_deref() == Some(query.as_str()) {
                        continue;
                    }

                    drop(active.take());
                    debug!("Searching tasks for {:?}", query);
                    active = Some(self.service.search(&query).await);
                    active_query = Some(query);
                }
                snapshot = next_snapshot(&mut active) => match snapshot {
                    Some(tasks) => {
                        self.results_tx.send_replace(SearchResults {
                            query: active_query.clone().unwrap_or_default(),
                            tasks: Arc::new(tasks),
                        });
                    }
                    None => {
                        warn!("Search subscription closed by the store");
                        active = None;
                        active_query = None;
                    }
                },
            }
        }
    }
}

async fn quiet_period(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}

async fn next_snapshot(active: &mut Option<LiveQuery>) -> Option<Vec<Task>> {
    match active {
        Some(live) => live.next().await,
        None => future::pending().await,
    }
}
