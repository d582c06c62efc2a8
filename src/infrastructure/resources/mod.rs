//! Static resources bundled into the binary.

use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info};

use crate::domain::errors::ResourceError;
use crate::domain::ports::ResourceBundlePort;

/// Placeholder image served when a page has no thumbnail of its own.
static DEFAULT_THUMBNAIL_PNG: &[u8] = include_bytes!("default_thumbnail.png");

/// Resource bundle backed by the compiled-in default thumbnail, optionally
/// replaced by a file from configuration.
///
/// The override is read and decode-checked eagerly at construction; a file
/// that cannot be loaded aborts startup instead of surfacing later on the
/// serving path.
#[derive(Debug, Clone)]
pub struct BundledResources {
    default_thumbnail: Bytes,
}

impl BundledResources {
    /// Bundle serving the compiled-in thumbnail.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            default_thumbnail: Bytes::from_static(DEFAULT_THUMBNAIL_PNG),
        }
    }

    /// Bundle serving a thumbnail read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the file cannot be read or does not
    /// decode as an image.
    pub async fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| ResourceError::io(path, e))?;

        if let Err(e) = image::load_from_memory(&raw) {
            return Err(ResourceError::invalid_image(path, e.to_string()));
        }

        info!(
            path = %path.display(),
            size = raw.len(),
            "Default thumbnail override loaded"
        );
        Ok(Self {
            default_thumbnail: Bytes::from(raw),
        })
    }

    /// Bundle from configuration: the override file when set, otherwise the
    /// compiled-in image.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a configured override cannot be loaded.
    pub async fn from_config(override_path: Option<&Path>) -> Result<Self, ResourceError> {
        match override_path {
            Some(path) => Self::from_file(path).await,
            None => Ok(Self::bundled()),
        }
    }
}

impl ResourceBundlePort for BundledResources {
    fn load_default_thumbnail(&self) -> Bytes {
        debug!(
            size = self.default_thumbnail.len(),
            "Serving default thumbnail bytes"
        );
        self.default_thumbnail.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_thumbnail_decodes() {
        let bundle = BundledResources::bundled();
        let bytes = bundle.load_default_thumbnail();
        assert!(!bytes.is_empty());
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn test_repeated_loads_share_the_buffer() {
        let bundle = BundledResources::bundled();
        let first = bundle.load_default_thumbnail();
        let second = bundle.load_default_thumbnail();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_override_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.png");
        std::fs::write(&path, DEFAULT_THUMBNAIL_PNG).unwrap();

        let bundle = BundledResources::from_file(&path).await.unwrap();
        assert_eq!(
            bundle.load_default_thumbnail(),
            Bytes::from_static(DEFAULT_THUMBNAIL_PNG)
        );
    }

    #[tokio::test]
    async fn test_missing_override_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        let result = BundledResources::from_file(&path).await;
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }

    #[tokio::test]
    async fn test_undecodable_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = BundledResources::from_file(&path).await;
        assert!(matches!(result, Err(ResourceError::InvalidImage { .. })));
    }

    #[tokio::test]
    async fn test_from_config_without_override_uses_bundled() {
        let bundle = BundledResources::from_config(None).await.unwrap();
        assert_eq!(
            bundle.load_default_thumbnail(),
            Bytes::from_static(DEFAULT_THUMBNAIL_PNG)
        );
    }
}
