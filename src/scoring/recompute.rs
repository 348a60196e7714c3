use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::Category;
use super::overall;
use super::store::{ScoreStore, StorageError};

/// Rebuilds the derived overall standings table from the three source
/// categories. Idle between rebuilds; a full clear-and-rebuild is published
/// as one atomic table swap.
pub struct RecomputeTrigger<S> {
    store: Arc<S>,
    recomputing: Arc<AtomicBool>,
}

impl<S> Clone for RecomputeTrigger<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            recomputing: self.recomputing.clone(),
        }
    }
}

impl<S: ScoreStore + 'static> RecomputeTrigger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            recomputing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_recomputing(&self) -> bool {
        self.recomputing.load(Ordering::Acquire)
    }

    /// Full rebuild of the derived table. Returns the number of candidates
    /// written. An absent source table contributes zero rows; a storage
    /// failure propagates.
    pub fn rebuild(&self) -> Result<usize, StorageError> {
        self.recomputing.store(true, Ordering::Release);
        let outcome = self.rebuild_inner();
        self.recomputing.store(false, Ordering::Release);
        outcome
    }

    fn rebuild_inner(&self) -> Result<usize, StorageError> {
        let mut sources = Vec::with_capacity(Category::OVERALL_SOURCES.len());
        for category in Category::OVERALL_SOURCES {
            sources.push((category, self.store.read_all(category)?));
        }

        let rows = overall::build_overall_rows(&sources);
        let count = rows.len();
        self.store.publish_overall(rows)?;
        info!(candidates = count, "published derived overall standings");
        Ok(count)
    }

    /// Best-effort rebuild after a qualifying submission. Runs on the
    /// current async runtime when one is available; failures are logged,
    /// never reported to the submitter.
    pub fn dispatch(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let trigger = self.clone();
                handle.spawn(async move {
                    if let Err(err) = trigger.rebuild() {
                        warn!(%err, "background overall recompute failed");
                    }
                });
            }
            Err(_) => {
                if let Err(err) = self.rebuild() {
                    warn!(%err, "overall recompute failed");
                }
            }
        }
    }
}
