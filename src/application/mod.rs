//! Application layer with the gateway and its supporting services.

/// The request gateway and its serving task.
pub mod gateway;
/// Supporting services.
pub mod services;

pub use gateway::ThumbnailGateway;
pub use services::{BackendSelector, DefaultImageCache};
