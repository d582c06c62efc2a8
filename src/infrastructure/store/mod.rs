//! Thumbnail store backend.

mod memory;

pub use memory::{DEFAULT_STORE_CAPACITY, MemoryThumbnailStore, StoreStats};
