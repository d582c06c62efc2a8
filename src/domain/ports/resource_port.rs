//! Resource bundle port definition.

use bytes::Bytes;

/// Port over the static resource source supplying the default thumbnail.
///
/// Implementations prepare their bytes before the gateway exists, so the call
/// itself cannot fail; a missing or broken resource is a startup error, not a
/// serving-path concern.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceBundlePort: Send + Sync {
    /// Returns the default thumbnail bytes.
    fn load_default_thumbnail(&self) -> Bytes;
}
