//! Selection relay
//!
//! Turns a stream of selected-index events into a stream of concrete
//! [`MediaRef`] values for the navigation collaborator. Items are looked up
//! in the list as it exists when the event is processed, not a snapshot
//! taken at emission time; indices the current list no longer covers are
//! dropped without error.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::MediaRef;
use crate::pipeline::search::SearchSnapshot;

/// Returns the item list as it exists at the moment a selection event is
/// processed.
pub type ItemsProvider = Arc<dyn Fn() -> Vec<MediaRef> + Send + Sync>;

/// Handle to the relay task. Dropping it stops the relay.
pub struct SelectionRelay {
    indices: mpsc::UnboundedSender<usize>,
    task: JoinHandle<()>,
}

impl SelectionRelay {
    /// Spawn the relay; returns it together with the stream of resolved
    /// selections. Must be called within a Tokio runtime.
    pub fn spawn(provider: ItemsProvider) -> (Self, mpsc::UnboundedReceiver<MediaRef>) {
        let (index_tx, mut index_rx) = mpsc::unbounded_channel::<usize>();
        let (selected_tx, selected_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Some(index) = index_rx.recv().await {
                let items = provider();
                match items.into_iter().nth(index) {
                    Some(item) => {
                        let _ = selected_tx.send(item);
                    }
                    None => debug!(index, "selection index out of range, dropping"),
                }
            }
        });

        (
            Self {
                indices: index_tx,
                task,
            },
            selected_rx,
        )
    }

    /// Wire a relay to the current items of a search snapshot stream.
    pub fn for_search(
        snapshots: watch::Receiver<SearchSnapshot>,
    ) -> (Self, mpsc::UnboundedReceiver<MediaRef>) {
        Self::spawn(Arc::new(move || snapshots.borrow().media_items()))
    }

    /// Feed a selected display index.
    pub fn select(&self, index: usize) {
        let _ = self.indices.send(index);
    }
}

impl Drop for SelectionRelay {
    fn drop(&mut self) {
        self.task.abort();
    }
}
