//! This module provides the snapshot that is currently being served

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// The outcome of a successful refresh: the origin feed, and its free/busy counterpart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    raw: Vec<u8>,
    free_busy: String,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new<R: Into<Vec<u8>>>(raw: R, free_busy: String, fetched_at: DateTime<Utc>) -> Self {
        Self { raw: raw.into(), free_busy, fetched_at }
    }

    /// The calendar, byte for byte as it was fetched from the origin
    pub fn raw(&self) -> &[u8] { &self.raw }
    /// The censored calendar
    pub fn free_busy(&self) -> &str { &self.free_busy }
    /// When the raw calendar was fetched
    pub fn fetched_at(&self) -> DateTime<Utc> { self.fetched_at }
}


/// Holds the published [`Snapshot`].
///
/// A snapshot is never modified once published, it is replaced as a whole. Readers get an `Arc` to the snapshot that
/// was current when they asked, and never see the raw text of a refresh paired with the free/busy text of another.
#[derive(Debug)]
pub struct Cache {
    current: RwLock<Arc<Snapshot>>,
}

impl Cache {
    /// There is no such thing as an empty cache: serving starts with a first snapshot
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The snapshot that is currently published
    pub fn current(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the published snapshot
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// When the published snapshot was fetched
    pub fn last_fetch(&self) -> DateTime<Utc> {
        self.current().fetched_at()
    }
}
