//! Detail join pipeline
//!
//! Fans out the credits and similar-items fetches for one root item,
//! joins them into a single [`MediaDetail`] and multicasts the outcome.
//! Entries are reference-counted per root identity: the two network calls
//! run at most once while any subscriber is attached, late subscribers
//! replay the cached outcome, and the entry is evicted (aborting any
//! in-flight join) when the last subscriber detaches.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{FetchError, MediaCatalog};
use crate::models::{MediaDetail, MediaRef, MediaType};

/// What to do with a root whose media type failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownMediaPolicy {
    /// Send the literal `unknown` category to the catalog and let the
    /// remote decide.
    #[default]
    PassThrough,
    /// Fail the join locally without touching the network.
    Reject,
}

type DetailKey = (MediaType, u64);
type DetailOutcome = Result<MediaDetail, FetchError>;
type EntryMap = Arc<Mutex<HashMap<DetailKey, CacheEntry>>>;

struct CacheEntry {
    tx: watch::Sender<Option<DetailOutcome>>,
    subscribers: usize,
    join_task: Option<JoinHandle<()>>,
}

/// Multicast, replay-on-subscribe source of joined media details.
#[derive(Clone)]
pub struct DetailHub {
    catalog: Arc<dyn MediaCatalog>,
    policy: UnknownMediaPolicy,
    entries: EntryMap,
}

impl DetailHub {
    pub fn new(catalog: Arc<dyn MediaCatalog>) -> Self {
        Self::with_policy(catalog, UnknownMediaPolicy::default())
    }

    pub fn with_policy(catalog: Arc<dyn MediaCatalog>, policy: UnknownMediaPolicy) -> Self {
        Self {
            catalog,
            policy,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to the joined detail for `root`.
    ///
    /// The first subscription for a given `(media_type, id)` issues both
    /// fetches concurrently; further subscriptions share that work and its
    /// outcome. Must be called within a Tokio runtime.
    pub fn observe(&self, root: &MediaRef) -> DetailSubscription {
        let key = (root.media_type, root.id);
        let mut entries = self.entries.lock().unwrap();

        let rx = match entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.subscribers += 1;
                entry.tx.subscribe()
            }
            Entry::Vacant(vacant) => {
                let (tx, rx) = watch::channel(None);
                let join_task = self.start_join(root, tx.clone());
                vacant.insert(CacheEntry {
                    tx,
                    subscribers: 1,
                    join_task,
                });
                rx
            }
        };

        DetailSubscription {
            key,
            rx,
            entries: Arc::clone(&self.entries),
        }
    }

    fn start_join(
        &self,
        root: &MediaRef,
        tx: watch::Sender<Option<DetailOutcome>>,
    ) -> Option<JoinHandle<()>> {
        if root.media_type == MediaType::Unknown && self.policy == UnknownMediaPolicy::Reject {
            warn!(id = root.id, "rejecting detail join for unknown media type");
            let _ = tx.send(Some(Err(FetchError::NotFound)));
            return None;
        }

        let catalog = Arc::clone(&self.catalog);
        let root = root.clone();
        debug!(id = root.id, media_type = %root.media_type, "starting detail join");

        Some(tokio::spawn(async move {
            let outcome = match tokio::try_join!(
                catalog.fetch_cast_crew(root.media_type, root.id),
                catalog.fetch_similar(root.media_type, root.id),
            ) {
                Ok((credits, similar)) => Ok(MediaDetail::join(root, credits, similar)),
                Err(err) => {
                    warn!(error = %err, "detail join failed");
                    Err(err)
                }
            };
            let _ = tx.send(Some(outcome));
        }))
    }
}

/// One subscriber's handle onto a detail join.
///
/// Dropping it detaches from the shared entry; dropping the last handle for
/// a root evicts the cached outcome and aborts any in-flight join.
pub struct DetailSubscription {
    key: DetailKey,
    rx: watch::Receiver<Option<DetailOutcome>>,
    entries: EntryMap,
}

impl DetailSubscription {
    /// Wait for the joined detail, or replay the cached outcome immediately.
    pub async fn recv(&mut self) -> DetailOutcome {
        let outcome = self
            .rx
            .wait_for(|value| value.is_some())
            .await
            .map(|value| value.clone());
        match outcome {
            Ok(Some(result)) => result,
            // The sender lives in the entry this subscription keeps alive,
            // so a closed channel means the pipeline was torn down.
            Ok(None) | Err(_) => Err(FetchError::Transport("detail stream closed".into())),
        }
    }

    /// The most recent outcome, if the join has completed.
    pub fn latest(&self) -> Option<DetailOutcome> {
        self.rx.borrow().clone()
    }
}

impl Drop for DetailSubscription {
    fn drop(&mut self) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        let Some(entry) = entries.get_mut(&self.key) else {
            return;
        };

        entry.subscribers -= 1;
        if entry.subscribers == 0 {
            debug!(id = self.key.1, "evicting detail cache entry");
            if let Some(entry) = entries.remove(&self.key) {
                if let Some(task) = entry.join_task {
                    task.abort();
                }
            }
        }
    }
}
