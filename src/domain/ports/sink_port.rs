//! Response sink port definition.

use crate::domain::entities::ThumbnailResponse;

/// Port through which resolved responses leave the gateway.
///
/// Fire-and-forget: the gateway calls this exactly once per lookup it still
/// owns, always from its serving task, and never learns whether anyone is
/// listening.
pub trait ResponseSinkPort: Send + Sync {
    /// Delivers one response.
    fn emit(&self, response: ThumbnailResponse);
}
