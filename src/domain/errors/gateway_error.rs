//! Gateway error types.

use thiserror::Error;

/// Errors surfaced when submitting work to the gateway.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GatewayError {
    /// The serving loop has stopped and no longer accepts lookups.
    #[error("gateway is shutting down, lookup rejected")]
    ShuttingDown,
}

impl GatewayError {
    /// Returns true if the gateway is gone for good.
    #[must_use]
    pub const fn is_shutting_down(&self) -> bool {
        matches!(self, Self::ShuttingDown)
    }
}
