//! History service task answering thumbnail lookups by handle.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use crate::domain::entities::{LookupHandle, PageUrl, ThumbnailKey};

/// Reply to one history lookup: the handle it was issued under plus the
/// thumbnail bytes, if the history table holds any.
pub type HistoryReply = (LookupHandle, Option<Bytes>);

struct HistoryJob {
    handle: LookupHandle,
    key: ThumbnailKey,
    reply: oneshot::Sender<HistoryReply>,
}

/// Builder for the history service's thumbnail table.
///
/// Once spawned the service runs as a background task and is reachable only
/// through its [`HistoryClient`]; the table is frozen from then on.
#[derive(Default)]
pub struct HistoryService {
    table: HashMap<ThumbnailKey, Bytes>,
}

impl HistoryService {
    /// Creates a service with an empty thumbnail table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the thumbnail for a visited page.
    pub fn record_thumbnail(&mut self, url: &PageUrl, bytes: Bytes) {
        let key = ThumbnailKey::from_url(url);
        debug!(url = %url, key = %key, size = bytes.len(), "Recording history thumbnail");
        self.table.insert(key, bytes);
    }

    /// Number of recorded thumbnails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true when no thumbnails are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Spawns the service task and returns the client to reach it.
    #[must_use]
    pub fn spawn(self) -> HistoryClient {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<HistoryJob>();
        let table = self.table;

        tokio::spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let thumbnail = table.get(&job.key).cloned();
                trace!(
                    handle = %job.handle,
                    found = thumbnail.is_some(),
                    "History lookup answered"
                );
                let _ = job.reply.send((job.handle, thumbnail));
            }
            debug!("History service stopped");
        });

        HistoryClient {
            job_tx,
            next_handle: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Client side of a running history service.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    job_tx: mpsc::UnboundedSender<HistoryJob>,
    next_handle: Arc<AtomicU64>,
}

impl HistoryClient {
    /// Issues a lookup and returns the handle the service will answer under.
    ///
    /// The reply arrives on `reply`. If the service has stopped, the sender
    /// is dropped unanswered and the receiver resolves to an error.
    pub fn lookup(&self, url: &PageUrl, reply: oneshot::Sender<HistoryReply>) -> LookupHandle {
        let handle = LookupHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let job = HistoryJob {
            handle,
            key: ThumbnailKey::from_url(url),
            reply,
        };
        let _ = self.job_tx.send(job);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::timeout;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_lookup_answers_under_its_handle() {
        let mut service = HistoryService::new();
        let url = PageUrl::new("https://example.com/");
        service.record_thumbnail(&url, Bytes::from_static(b"history-jpeg"));
        let client = service.spawn();

        let (reply_tx, reply_rx) = oneshot::channel();
        let handle = client.lookup(&url, reply_tx);

        let reply = timeout(Duration::from_secs(1), reply_rx).await.unwrap();
        let (replied_handle, thumbnail) = assert_ok!(reply);
        assert_eq!(replied_handle, handle);
        assert_eq!(thumbnail, Some(Bytes::from_static(b"history-jpeg")));
    }

    #[tokio::test]
    async fn test_unknown_url_answers_none() {
        let client = HistoryService::new().spawn();

        let (reply_tx, reply_rx) = oneshot::channel();
        let handle = client.lookup(&PageUrl::new("https://nowhere.example/"), reply_tx);

        let (replied_handle, thumbnail) =
            timeout(Duration::from_secs(1), reply_rx).await.unwrap().unwrap();
        assert_eq!(replied_handle, handle);
        assert_eq!(thumbnail, None);
    }

    #[tokio::test]
    async fn test_handles_are_distinct_per_lookup() {
        let mut service = HistoryService::new();
        let url = PageUrl::new("https://example.com/");
        service.record_thumbnail(&url, Bytes::from_static(b"x"));
        let client = service.spawn();

        let (tx_a, _rx_a) = oneshot::channel();
        let (tx_b, _rx_b) = oneshot::channel();
        let a = client.lookup(&url, tx_a);
        let b = client.lookup(&url, tx_b);

        assert_ne!(a, b);
    }
}
