//! Legacy backend adapter over the history service.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::entities::{
    BackendKind, LookupCompletion, LookupHandle, LookupStatus, PageUrl, RequestId,
};
use crate::domain::ports::BackendPort;

use super::service::HistoryClient;

/// Backend for deployments still serving thumbnails out of history.
///
/// The history service answers under its own handle, not the caller's request
/// id, so every lookup's `handle -> request id` association is kept here and
/// each reply is translated before it reaches the gateway. A reply whose
/// handle is no longer associated was cancelled and is dropped.
pub struct HistoryBackend {
    client: Option<HistoryClient>,
    associations: Arc<Mutex<HashMap<LookupHandle, RequestId>>>,
    completion_tx: mpsc::UnboundedSender<LookupCompletion>,
}

impl HistoryBackend {
    /// Creates the adapter.
    ///
    /// `client` is `None` when this deployment has no history service; every
    /// probe then answers [`LookupStatus::Unavailable`].
    #[must_use]
    pub fn new(
        client: Option<HistoryClient>,
        completion_tx: mpsc::UnboundedSender<LookupCompletion>,
    ) -> Self {
        Self {
            client,
            associations: Arc::new(Mutex::new(HashMap::new())),
            completion_tx,
        }
    }

    /// Number of lookups whose reply is still awaited.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.associations.lock().len()
    }
}

#[async_trait]
impl BackendPort for HistoryBackend {
    async fn probe(&self, _url: &PageUrl) -> LookupStatus {
        if self.client.is_some() {
            LookupStatus::Pending
        } else {
            LookupStatus::Unavailable
        }
    }

    async fn begin_lookup(&self, url: PageUrl, request_id: RequestId) {
        let Some(client) = &self.client else {
            // probe() already answered Unavailable; nothing to start.
            return;
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        let handle = client.lookup(&url, reply_tx);

        // Associate before the reply can arrive, or a fast service could
        // answer a handle nobody knows yet.
        self.associations.lock().insert(handle, request_id);
        debug!(request_id = %request_id, handle = %handle, url = %url, "History lookup issued");

        let associations = Arc::clone(&self.associations);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let (handle, thumbnail) = match reply_rx.await {
                Ok(reply) => reply,
                Err(_) => {
                    warn!(handle = %handle, "History service dropped a reply");
                    (handle, None)
                }
            };

            let Some(request_id) = associations.lock().remove(&handle) else {
                debug!(handle = %handle, "Reply for a cancelled lookup, dropping");
                return;
            };
            let _ = completion_tx.send(LookupCompletion::new(request_id, thumbnail));
        });
    }

    async fn cancel_all(&self, ids: HashSet<RequestId>) {
        if ids.is_empty() {
            return;
        }
        let mut associations = self.associations.lock();
        let before = associations.len();
        associations.retain(|_, id| !ids.contains(id));
        debug!(
            cancelled = before - associations.len(),
            "History lookups disassociated"
        );
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use bytes::Bytes;
    use tokio::time::timeout;

    use crate::infrastructure::history::HistoryService;

    fn spawn_backend(
        service: HistoryService,
    ) -> (HistoryBackend, mpsc::UnboundedReceiver<LookupCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (HistoryBackend::new(Some(service.spawn()), tx), rx)
    }

    async fn next_completion(
        rx: &mut mpsc::UnboundedReceiver<LookupCompletion>,
    ) -> LookupCompletion {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for completion")
            .expect("completion channel closed")
    }

    #[tokio::test]
    async fn test_probe_is_pending_with_a_service() {
        let (backend, _rx) = spawn_backend(HistoryService::new());
        let status = backend.probe(&PageUrl::new("https://example.com/")).await;
        assert_eq!(status, LookupStatus::Pending);
    }

    #[tokio::test]
    async fn test_probe_is_unavailable_without_a_service() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let backend = HistoryBackend::new(None, tx);

        let status = backend.probe(&PageUrl::new("https://example.com/")).await;
        assert_eq!(status, LookupStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_reply_is_translated_to_the_request_id() {
        let mut service = HistoryService::new();
        let url = PageUrl::new("https://example.com/");
        service.record_thumbnail(&url, Bytes::from_static(b"history-jpeg"));
        let (backend, mut rx) = spawn_backend(service);

        backend.begin_lookup(url, RequestId::new(77)).await;

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.request_id, RequestId::new(77));
        assert_eq!(completion.thumbnail, Some(Bytes::from_static(b"history-jpeg")));
        assert_eq!(backend.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_interleaved_lookups_keep_their_ids() {
        let mut service = HistoryService::new();
        let with_thumb = PageUrl::new("https://example.com/");
        let without = PageUrl::new("https://bare.example/");
        service.record_thumbnail(&with_thumb, Bytes::from_static(b"history-jpeg"));
        let (backend, mut rx) = spawn_backend(service);

        backend.begin_lookup(with_thumb, RequestId::new(1)).await;
        backend.begin_lookup(without, RequestId::new(2)).await;

        let mut completions = vec![
            next_completion(&mut rx).await,
            next_completion(&mut rx).await,
        ];
        completions.sort_by_key(|c| c.request_id.as_u64());

        assert_eq!(completions[0].request_id, RequestId::new(1));
        assert_eq!(
            completions[0].thumbnail,
            Some(Bytes::from_static(b"history-jpeg"))
        );
        assert_eq!(completions[1].request_id, RequestId::new(2));
        assert_eq!(completions[1].thumbnail, None);
    }

    #[tokio::test]
    async fn test_cancelled_lookup_never_reaches_the_channel() {
        let mut service = HistoryService::new();
        let url = PageUrl::new("https://example.com/");
        service.record_thumbnail(&url, Bytes::from_static(b"history-jpeg"));
        let (backend, mut rx) = spawn_backend(service);

        let id = RequestId::new(5);
        backend.begin_lookup(url, id).await;
        // Single-threaded test runtime: neither the service task nor the
        // reply forwarder has run before this point, so the association is
        // removed before any reply exists.
        backend.cancel_all(HashSet::from([id])).await;

        let result = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(result.is_err(), "cancelled lookup must not complete");
        assert_eq!(backend.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_unrecorded_url_completes_with_none() {
        let (backend, mut rx) = spawn_backend(HistoryService::new());

        backend
            .begin_lookup(PageUrl::new("https://bare.example/"), RequestId::new(9))
            .await;

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.request_id, RequestId::new(9));
        assert_eq!(completion.thumbnail, None);
    }
}
