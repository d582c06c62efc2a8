//! Backend selection from configuration.

use crate::domain::entities::BackendKind;

/// Decides once, at startup, which backing store serves lookups.
///
/// The flag is captured at construction and never re-read, so every lookup in
/// a process lifetime goes to the same backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendSelector {
    use_thumbnail_store: bool,
}

impl BackendSelector {
    /// Captures the backend flag.
    #[must_use]
    pub const fn new(use_thumbnail_store: bool) -> Self {
        Self {
            use_thumbnail_store,
        }
    }

    /// The backend every lookup will be routed to.
    #[must_use]
    pub const fn select(self) -> BackendKind {
        if self.use_thumbnail_store {
            BackendKind::Primary
        } else {
            BackendKind::Legacy
        }
    }
}
