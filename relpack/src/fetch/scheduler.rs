//! Download concurrency scheduler.
//!
//! Bounds the number of asset downloads in flight across the whole run.
//! The scheduler is an explicit object injected into whichever component
//! issues downloads, not ambient shared state; clones share the same
//! underlying permit pool. With the default bound of 1 every download in a
//! run is strictly serialized, even across releases.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::DEFAULT_PARALLEL_DOWNLOADS;

/// Process-wide download slot pool.
///
/// Waiters are served in FIFO order, so queued downloads begin in
/// submission order once the prior one settles.
#[derive(Debug, Clone)]
pub struct DownloadScheduler {
    semaphore: Arc<Semaphore>,
    permits: usize,
}

impl Default for DownloadScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_DOWNLOADS)
    }
}

impl DownloadScheduler {
    /// Create a scheduler with the given concurrency bound (minimum 1).
    pub fn new(permits: usize) -> Self {
        let permits = permits.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            permits,
        }
    }

    /// The configured concurrency bound.
    pub fn permits(&self) -> usize {
        self.permits
    }

    /// Currently available download slots.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Acquire a download slot, waiting until one frees up.
    ///
    /// The slot is released when the returned permit is dropped, whether
    /// the download succeeded or failed.
    pub async fn acquire(&self) -> DownloadPermit {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("download semaphore closed");

        DownloadPermit { _permit: permit }
    }
}

/// A held download slot. Released on drop.
pub struct DownloadPermit {
    _permit: OwnedSemaphorePermit,
}
