//! Legacy history-service backend.

mod backend;
mod service;

pub use backend::HistoryBackend;
pub use service::{HistoryClient, HistoryReply, HistoryService};
