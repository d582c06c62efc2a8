//! Backend identity.

/// Which backing store serves thumbnail lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The in-process thumbnail store: synchronous probes plus an
    /// asynchronous path for redirect resolution.
    Primary,
    /// The legacy history service: every lookup is asynchronous and
    /// correlated by a service-assigned handle.
    Legacy,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "thumbnail-store"),
            Self::Legacy => write!(f, "history-service"),
        }
    }
}
