//! Lookup outcome types shared by both backends.

use bytes::Bytes;

use super::RequestId;

/// Synchronous answer of a backend probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStatus {
    /// The backend holds the thumbnail; resolution completes in-line.
    Hit(Bytes),
    /// The backend definitively has nothing for this URL.
    Miss,
    /// The backend needs asynchronous work; a completion will follow.
    Pending,
    /// No backend instance exists in this deployment.
    Unavailable,
}

impl LookupStatus {
    /// Returns true if an asynchronous completion will follow.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Completion notification from either backend's asynchronous path.
///
/// The handle-indexed history reply and the direct store reply both collapse
/// into this shape before reaching the gateway, which from here on treats all
/// completions identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCompletion {
    /// The request this completion belongs to.
    pub request_id: RequestId,
    /// The thumbnail bytes, if the backend found any.
    pub thumbnail: Option<Bytes>,
}

impl LookupCompletion {
    /// Creates a completion carrying an optional payload.
    #[must_use]
    pub const fn new(request_id: RequestId, thumbnail: Option<Bytes>) -> Self {
        Self { request_id, thumbnail }
    }

    /// Completion carrying thumbnail bytes.
    #[must_use]
    pub const fn found(request_id: RequestId, bytes: Bytes) -> Self {
        Self { request_id, thumbnail: Some(bytes) }
    }

    /// Completion with nothing found.
    #[must_use]
    pub const fn empty(request_id: RequestId) -> Self {
        Self { request_id, thumbnail: None }
    }
}

/// Token the history service assigns to one of its own lookups.
///
/// Unrelated to [`RequestId`]; the two are associated by the legacy backend
/// adapter for the lifetime of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupHandle(pub u64);

impl LookupHandle {
    /// Returns the raw handle value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LookupHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_predicate() {
        assert!(LookupStatus::Pending.is_pending());
        assert!(!LookupStatus::Miss.is_pending());
        assert!(!LookupStatus::Unavailable.is_pending());
    }

    #[test]
    fn test_completion_constructors() {
        let id = RequestId::new(3);
        assert_eq!(LookupCompletion::empty(id).thumbnail, None);
        let found = LookupCompletion::found(id, Bytes::from_static(b"jpeg"));
        assert_eq!(found.thumbnail, Some(Bytes::from_static(b"jpeg")));
        assert_eq!(found.request_id, id);
    }
}
