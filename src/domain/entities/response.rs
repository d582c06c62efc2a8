//! The terminal response emitted for every lookup.

use bytes::Bytes;

use super::RequestId;

/// Answer delivered through the response sink, exactly once per lookup.
///
/// `thumbnail` is `Some` for both real thumbnails and the default image; it
/// is `None` only when no backend exists to ask, which callers may want to
/// distinguish from "page has no thumbnail yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailResponse {
    /// The caller's correlation id.
    pub request_id: RequestId,
    /// The resolved bytes, or `None` when no backend was available.
    pub thumbnail: Option<Bytes>,
}

impl ThumbnailResponse {
    /// Response carrying resolved thumbnail bytes.
    #[must_use]
    pub const fn with_thumbnail(request_id: RequestId, bytes: Bytes) -> Self {
        Self { request_id, thumbnail: Some(bytes) }
    }

    /// Response signalling that no backend could be asked at all.
    #[must_use]
    pub const fn absent(request_id: RequestId) -> Self {
        Self { request_id, thumbnail: None }
    }

    /// Returns true when no backend could be asked.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.thumbnail.is_none()
    }
}
