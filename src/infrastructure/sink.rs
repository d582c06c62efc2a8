//! Channel-backed response sink.

use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::ThumbnailResponse;
use crate::domain::ports::ResponseSinkPort;

/// Sink delivering responses over an unbounded channel.
///
/// Emission is fire-and-forget by contract: if the receiving side is gone,
/// responses are silently discarded.
#[derive(Debug, Clone)]
pub struct ChannelResponseSink {
    response_tx: mpsc::UnboundedSender<ThumbnailResponse>,
}

impl ChannelResponseSink {
    /// Creates the sink and the receiver callers consume responses from.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ThumbnailResponse>) {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        (Self { response_tx }, response_rx)
    }
}

impl ResponseSinkPort for ChannelResponseSink {
    fn emit(&self, response: ThumbnailResponse) {
        trace!(
            request_id = %response.request_id,
            absent = response.is_absent(),
            "Response emitted"
        );
        let _ = self.response_tx.send(response);
    }
}
