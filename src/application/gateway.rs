//! The thumbnail request gateway.
//!
//! One serving task owns every piece of mutable state: it dispatches incoming
//! lookups against the configured backend, resolves asynchronous completions
//! from either backend through a single shared path, and cancels whatever is
//! still outstanding when it shuts down. Callers interact only with the
//! non-blocking [`ThumbnailGateway`] handle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::services::DefaultImageCache;
use crate::domain::entities::{
    LookupCompletion, LookupStatus, PageUrl, PendingRequests, RequestId, ThumbnailResponse,
};
use crate::domain::errors::GatewayError;
use crate::domain::ports::{BackendPort, ResourceBundlePort, ResponseSinkPort};

/// Commands accepted by the serving task.
#[derive(Debug)]
enum GatewayCommand {
    Lookup { url: PageUrl, request_id: RequestId },
    Shutdown,
}

/// Handle to a running thumbnail gateway.
///
/// `lookup` enqueues work and returns immediately; every submitted request is
/// answered exactly once through the response sink, unless the gateway shuts
/// down first, in which case outstanding lookups are cancelled and answer
/// nothing.
pub struct ThumbnailGateway {
    command_tx: mpsc::UnboundedSender<GatewayCommand>,
    pending: PendingRequests,
    worker: Option<JoinHandle<()>>,
}

/// State owned by the serving task.
struct WorkerState {
    backend: Arc<dyn BackendPort>,
    sink: Arc<dyn ResponseSinkPort>,
    default_image: DefaultImageCache,
    pending: PendingRequests,
    command_rx: mpsc::UnboundedReceiver<GatewayCommand>,
    completion_rx: mpsc::UnboundedReceiver<LookupCompletion>,
}

impl ThumbnailGateway {
    /// Spawns the serving task over the chosen backend.
    ///
    /// `completion_rx` must be the receiving end of the channel the backend
    /// delivers its [`LookupCompletion`]s on.
    #[must_use]
    pub fn spawn(
        backend: Arc<dyn BackendPort>,
        completion_rx: mpsc::UnboundedReceiver<LookupCompletion>,
        bundle: Arc<dyn ResourceBundlePort>,
        sink: Arc<dyn ResponseSinkPort>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let pending = PendingRequests::new();

        info!(backend = %backend.kind(), "Thumbnail gateway starting");

        let state = WorkerState {
            backend,
            sink,
            default_image: DefaultImageCache::new(bundle),
            pending: pending.clone(),
            command_rx,
            completion_rx,
        };

        Self {
            command_tx,
            pending,
            worker: Some(tokio::spawn(Self::run_worker_loop(state))),
        }
    }

    /// Submits a lookup for `url`, correlated by `request_id`.
    ///
    /// Never blocks; the answer arrives through the response sink.
    ///
    /// # Errors
    /// Returns [`GatewayError::ShuttingDown`] when the serving task is gone.
    pub fn lookup(&self, url: PageUrl, request_id: RequestId) -> Result<(), GatewayError> {
        self.command_tx
            .send(GatewayCommand::Lookup { url, request_id })
            .map_err(|_| GatewayError::ShuttingDown)
    }

    /// Returns true while `request_id` awaits an asynchronous completion.
    #[must_use]
    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.pending.contains(request_id)
    }

    /// Number of lookups currently awaiting an asynchronous completion.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Stops the serving task and waits for it to finish.
    ///
    /// Outstanding lookups are cancelled against the backend; their
    /// completions, delivered or not, are never resolved and no response is
    /// emitted for them.
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(GatewayCommand::Shutdown);
        if let Some(worker) = self.worker.take()
            && let Err(e) = worker.await
        {
            warn!(error = %e, "Gateway worker ended abnormally");
        }
    }

    async fn run_worker_loop(mut state: WorkerState) {
        loop {
            tokio::select! {
                cmd = state.command_rx.recv() => {
                    match cmd {
                        Some(GatewayCommand::Lookup { url, request_id }) => {
                            state.dispatch(url, request_id).await;
                        }
                        Some(GatewayCommand::Shutdown) | None => {
                            state.cancel_outstanding().await;
                            break;
                        }
                    }
                }
                Some(completion) = state.completion_rx.recv() => {
                    state.resolve(completion);
                }
            }
        }
        debug!("Gateway worker stopped");
    }
}

impl WorkerState {
    /// Routes one lookup through the backend probe.
    async fn dispatch(&mut self, url: PageUrl, request_id: RequestId) {
        match self.backend.probe(&url).await {
            LookupStatus::Hit(bytes) => {
                debug!(request_id = %request_id, url = %url, size = bytes.len(), "Probe hit");
                self.sink
                    .emit(ThumbnailResponse::with_thumbnail(request_id, bytes));
            }
            LookupStatus::Miss => {
                debug!(request_id = %request_id, url = %url, "Probe miss, serving default");
                let default = self.default_image.get();
                self.sink
                    .emit(ThumbnailResponse::with_thumbnail(request_id, default));
            }
            LookupStatus::Pending => {
                if !self.pending.add(request_id) {
                    warn!(request_id = %request_id, "Request id reused while still pending");
                }
                debug!(request_id = %request_id, url = %url, "Probe deferred, starting async lookup");
                self.backend.begin_lookup(url, request_id).await;
            }
            LookupStatus::Unavailable => {
                debug!(request_id = %request_id, url = %url, "No backend available, answering absent");
                self.sink.emit(ThumbnailResponse::absent(request_id));
            }
        }
    }

    /// Resolves one asynchronous completion, from either backend.
    ///
    /// An empty payload and a missing one are treated alike: both fall back
    /// to the default thumbnail. This is the only place that normalization
    /// happens.
    fn resolve(&mut self, completion: LookupCompletion) {
        let LookupCompletion {
            request_id,
            thumbnail,
        } = completion;
        self.pending.remove(request_id);

        let bytes = match thumbnail {
            Some(bytes) if !bytes.is_empty() => {
                debug!(request_id = %request_id, size = bytes.len(), "Async lookup found a thumbnail");
                bytes
            }
            _ => {
                debug!(request_id = %request_id, "Async lookup found nothing, serving default");
                self.default_image.get()
            }
        };

        self.sink
            .emit(ThumbnailResponse::with_thumbnail(request_id, bytes));
    }

    /// Cancels every still-outstanding lookup against the backend.
    async fn cancel_outstanding(&mut self) {
        let outstanding = self.pending.drain_all();
        if outstanding.is_empty() {
            return;
        }
        info!(
            count = outstanding.len(),
            backend = %self.backend.kind(),
            "Cancelling outstanding lookups"
        );
        self.backend.cancel_all(outstanding).await;
    }
}
