//! Live query subscriptions
//!
//! A store keeps a [`Subscriptions`] registry next to its table. Every
//! committed mutation re-evaluates each registered query and pushes the full
//! result to its subscriber. Dropping a [`LiveQuery`] closes its channel and
//! the registry forgets it on the next publish or registration.

use tokio::sync::mpsc;
use tracing::debug;

use super::model::Task;
use super::query::TaskQuery;

/// Handle to a continuously updating query result
///
/// The first snapshot is available immediately; later snapshots arrive after
/// every write that reached the store. Snapshots are queued, never coalesced.
#[derive(Debug)]
pub struct LiveQuery {
    query: TaskQuery,
    rx: mpsc::UnboundedReceiver<Vec<Task>>,
}

impl LiveQuery {
    /// The query this subscription evaluates
    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Wait for the next snapshot
    ///
    /// Returns `None` once the store that produced this subscription is gone.
    pub async fn next(&mut self) -> Option<Vec<Task>> {
        self.rx.recv().await
    }

    /// Take the next snapshot if one is already queued
    pub fn try_next(&mut self) -> Option<Vec<Task>> {
        self.rx.try_recv().ok()
    }
}

struct Subscription {
    query: TaskQuery,
    tx: mpsc::UnboundedSender<Vec<Task>>,
}

/// Registry of active live queries
#[derive(Default)]
pub(crate) struct Subscriptions {
    entries: Vec<Subscription>,
}

impl Subscriptions {
    /// Register a query and deliver its initial snapshot
    pub(crate) fn register<'a>(
        &mut self,
        query: TaskQuery,
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> LiveQuery {
        self.entries.retain(|entry| !entry.tx.is_closed());

        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive right here, so the send cannot fail.
        let _ = tx.send(query.evaluate(tasks));
        self.entries.push(Subscription {
            query: query.clone(),
            tx,
        });
        LiveQuery { query, rx }
    }

    /// Push a fresh snapshot to every subscriber, dropping closed ones
    pub(crate) fn publish<'a, I>(&mut self, tasks: I)
    where
        I: IntoIterator<Item = &'a Task> + Clone,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            entry
                .tx
                .send(entry.query.evaluate(tasks.clone()))
                .is_ok()
        });
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!("Pruned {} closed task subscriptions", pruned);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.tx.is_closed()).count()
    }
}
