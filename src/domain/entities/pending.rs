//! Tracking of lookups awaiting an asynchronous completion.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use super::RequestId;

/// The set of request ids whose answer is still in flight.
///
/// A plain set, not a queue: membership starts when a backend reports that
/// asynchronous work is needed and ends when the completion is resolved or
/// the gateway tears down. Cloning shares the underlying set, so the serving
/// task and observers see the same state.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    ids: Arc<RwLock<HashSet<RequestId>>>,
}

impl PendingRequests {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request id as outstanding.
    ///
    /// Returns `false` when the id was already tracked, which means the
    /// caller reused an id before its previous lookup resolved.
    pub fn add(&self, id: RequestId) -> bool {
        self.ids.write().insert(id)
    }

    /// Clears the record for a resolved or cancelled lookup.
    ///
    /// A no-op when the id is not tracked, so completions that lost a race
    /// with teardown are harmless.
    pub fn remove(&self, id: RequestId) {
        self.ids.write().remove(&id);
    }

    /// Returns every outstanding id and leaves the tracker empty.
    ///
    /// Teardown only: the returned set is handed to the backend for
    /// cancellation.
    #[must_use]
    pub fn drain_all(&self) -> HashSet<RequestId> {
        std::mem::take(&mut *self.ids.write())
    }

    /// Returns true while `id` awaits a completion.
    #[must_use]
    pub fn contains(&self, id: RequestId) -> bool {
        self.ids.read().contains(&id)
    }

    /// Number of outstanding lookups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    /// Returns true when nothing is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let pending = PendingRequests::new();
        assert!(pending.add(RequestId::new(1)));
        assert!(pending.contains(RequestId::new(1)));
        pending.remove(RequestId::new(1));
        assert!(!pending.contains(RequestId::new(1)));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_duplicate_add_reports_reuse() {
        let pending = PendingRequests::new();
        assert!(pending.add(RequestId::new(5)));
        assert!(!pending.add(RequestId::new(5)));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let pending = PendingRequests::new();
        pending.remove(RequestId::new(9));
        pending.add(RequestId::new(9));
        pending.remove(RequestId::new(9));
        pending.remove(RequestId::new(9));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_drain_all_empties_the_tracker() {
        let pending = PendingRequests::new();
        pending.add(RequestId::new(1));
        pending.add(RequestId::new(2));
        pending.add(RequestId::new(3));

        let drained = pending.drain_all();
        assert_eq!(drained.len(), 3);
        assert!(drained.contains(&RequestId::new(2)));
        assert!(pending.is_empty());
        assert!(pending.drain_all().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let pending = PendingRequests::new();
        let observer = pending.clone();
        pending.add(RequestId::new(7));
        assert!(observer.contains(RequestId::new(7)));
        observer.remove(RequestId::new(7));
        assert!(pending.is_empty());
    }
}
