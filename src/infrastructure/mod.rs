//! Infrastructure layer with backend adapters and configuration.

/// Application configuration.
pub mod config;
/// Legacy history-service backend.
pub mod history;
/// Static resources bundled into the binary.
pub mod resources;
/// Response sink adapters.
pub mod sink;
/// Thumbnail store backend.
pub mod store;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use history::{HistoryBackend, HistoryClient, HistoryService};
pub use resources::BundledResources;
pub use sink::ChannelResponseSink;
pub use store::{MemoryThumbnailStore, StoreStats};
