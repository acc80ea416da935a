//! Single-slot active index state.

use tokio::sync::{RwLock, RwLockReadGuard};

/// The session's currently searchable index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveIndex {
    /// Vector store collection holding the chunks.
    pub collection: String,
    /// Monotonic ingestion generation that built this index.
    pub generation: u64,
    /// Identifier of the indexed document.
    pub document_id: String,
    /// Number of chunks in the index.
    pub chunk_count: usize,
}

/// A single-slot, session-scoped store for the active index.
///
/// Exactly one index is visible at a time. [`swap`](Self::swap) replaces
/// the slot behind a write lock; a reader holding the guard from
/// [`read`](Self::read) observes either the previous or the new index in
/// full, never a partial build — new indexes are assembled in a staging
/// collection before the swap.
#[derive(Debug, Default)]
pub struct IndexSlot {
    inner: RwLock<Option<ActiveIndex>>,
}

impl IndexSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the slot for reading. Hold the guard across retrieval so a
    /// concurrent swap cannot land mid-query.
    pub async fn read(&self) -> RwLockReadGuard<'_, Option<ActiveIndex>> {
        self.inner.read().await
    }

    /// Replace the active index, returning the displaced one.
    pub async fn swap(&self, next: ActiveIndex) -> Option<ActiveIndex> {
        let mut slot = self.inner.write().await;
        slot.replace(next)
    }

    /// Snapshot of the active index, if any.
    pub async fn current(&self) -> Option<ActiveIndex> {
        self.inner.read().await.clone()
    }
}
