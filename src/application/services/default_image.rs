//! Lazy memoization of the default thumbnail.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::domain::ports::ResourceBundlePort;

/// Memoized handle to the default thumbnail bytes.
///
/// The resource bundle is consulted at most once, on first demand; every
/// later call clones the same refcounted buffer. Owned exclusively by the
/// gateway's serving task, so plain `&mut self` access suffices and no lock
/// is involved.
pub struct DefaultImageCache {
    bundle: Arc<dyn ResourceBundlePort>,
    bytes: Option<Bytes>,
}

impl DefaultImageCache {
    /// Creates an empty cache over a resource bundle.
    #[must_use]
    pub fn new(bundle: Arc<dyn ResourceBundlePort>) -> Self {
        Self {
            bundle,
            bytes: None,
        }
    }

    /// Returns the default thumbnail, loading it on first demand.
    pub fn get(&mut self) -> Bytes {
        self.bytes
            .get_or_insert_with(|| {
                debug!("Loading default thumbnail from resource bundle");
                self.bundle.load_default_thumbnail()
            })
            .clone()
    }

    /// Returns true once the bytes have been materialized.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.bytes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockResourceBundlePort;

    #[test]
    fn test_bundle_consulted_at_most_once() {
        let mut bundle = MockResourceBundlePort::new();
        bundle
            .expect_load_default_thumbnail()
            .times(1)
            .returning(|| Bytes::from_static(b"default-png"));

        let mut cache = DefaultImageCache::new(Arc::new(bundle));
        assert!(!cache.is_loaded());

        let first = cache.get();
        let second = cache.get();
        let third = cache.get();

        assert!(cache.is_loaded());
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_untouched_cache_loads_nothing() {
        let mut bundle = MockResourceBundlePort::new();
        bundle.expect_load_default_thumbnail().times(0);

        let cache = DefaultImageCache::new(Arc::new(bundle));
        assert!(!cache.is_loaded());
    }
}
