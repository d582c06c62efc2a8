//! In-memory thumbnail store, the primary backend.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::{
    BackendKind, LookupCompletion, LookupStatus, PageUrl, RequestId, ThumbnailKey,
};
use crate::domain::ports::BackendPort;

/// Default maximum number of thumbnails kept in the hot map.
pub const DEFAULT_STORE_CAPACITY: usize = 256;

/// In-memory thumbnail store.
///
/// Canonical pages live in an LRU-bounded hot map and answer probes in-line.
/// URLs recorded as redirects answer [`LookupStatus::Pending`] and are chased
/// on a background task, delivering the result as a [`LookupCompletion`] on
/// the channel the store was built with.
pub struct MemoryThumbnailStore {
    inner: Arc<StoreInner>,
    completion_tx: mpsc::UnboundedSender<LookupCompletion>,
}

struct StoreInner {
    entries: Mutex<LruCache<ThumbnailKey, Bytes>>,
    redirects: RwLock<HashMap<ThumbnailKey, ThumbnailKey>>,
    cancelled: Mutex<HashSet<RequestId>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryThumbnailStore {
    /// Creates a store delivering completions on `completion_tx`.
    #[must_use]
    pub fn new(capacity: usize, completion_tx: mpsc::UnboundedSender<LookupCompletion>) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(StoreInner {
                entries: Mutex::new(LruCache::new(cap)),
                redirects: RwLock::new(HashMap::new()),
                cancelled: Mutex::new(HashSet::new()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
            completion_tx,
        }
    }

    /// Creates a store with the default capacity.
    #[must_use]
    pub fn with_default_capacity(completion_tx: mpsc::UnboundedSender<LookupCompletion>) -> Self {
        Self::new(DEFAULT_STORE_CAPACITY, completion_tx)
    }

    /// Stores the thumbnail for a canonical page URL.
    pub fn insert(&self, url: &PageUrl, bytes: Bytes) {
        let key = ThumbnailKey::from_url(url);
        debug!(url = %url, key = %key, size = bytes.len(), "Storing thumbnail");
        self.inner.entries.lock().put(key, bytes);
    }

    /// Records `from` as a redirect of the canonical page `to`.
    ///
    /// Lookups for `from` take the asynchronous path and resolve to whatever
    /// the canonical page holds at resolution time.
    pub fn insert_redirect(&self, from: &PageUrl, to: &PageUrl) {
        let from_key = ThumbnailKey::from_url(from);
        let to_key = ThumbnailKey::from_url(to);
        debug!(from = %from, to = %to, "Recording redirect");
        self.inner.redirects.write().insert(from_key, to_key);
    }

    /// Number of thumbnails currently in the hot map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Returns true when the hot map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns store statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> StoreStats {
        let hits = self.inner.hits.load(Ordering::Relaxed);
        let misses = self.inner.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        StoreStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

/// Statistics about store probe performance.
#[derive(Debug, Clone)]
pub struct StoreStats {
    /// Number of probe hits.
    pub hits: u64,
    /// Number of probe misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of stored thumbnails.
    pub size: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Store: {} thumbnails, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait]
impl BackendPort for MemoryThumbnailStore {
    async fn probe(&self, url: &PageUrl) -> LookupStatus {
        let key = ThumbnailKey::from_url(url);

        if let Some(bytes) = self.inner.entries.lock().get(&key).cloned() {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Store probe hit");
            return LookupStatus::Hit(bytes);
        }

        if self.inner.redirects.read().contains_key(&key) {
            trace!(url = %url, "Store probe found a redirect, deferring");
            return LookupStatus::Pending;
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        trace!(url = %url, "Store probe miss");
        LookupStatus::Miss
    }

    async fn begin_lookup(&self, url: PageUrl, request_id: RequestId) {
        let inner = self.inner.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let key = ThumbnailKey::from_url(&url);
            let canonical = inner.redirects.read().get(&key).cloned();
            let thumbnail =
                canonical.and_then(|c| inner.entries.lock().get(&c).cloned());

            if inner.cancelled.lock().remove(&request_id) {
                debug!(request_id = %request_id, "Lookup cancelled before completion");
                return;
            }

            let completion = match thumbnail {
                Some(bytes) => {
                    trace!(request_id = %request_id, url = %url, "Redirect resolved to a thumbnail");
                    LookupCompletion::found(request_id, bytes)
                }
                None => {
                    trace!(request_id = %request_id, url = %url, "Redirect resolved to nothing");
                    LookupCompletion::empty(request_id)
                }
            };
            let _ = completion_tx.send(completion);
        });
    }

    async fn cancel_all(&self, ids: HashSet<RequestId>) {
        if ids.is_empty() {
            return;
        }
        debug!(count = ids.len(), "Store lookups cancelled");
        // Entries for lookups that already completed are never consumed; the
        // set dies with the store at teardown.
        self.inner.cancelled.lock().extend(ids);
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Primary
    }
}
