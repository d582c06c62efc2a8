//! Resource loading error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures while preparing the default thumbnail resource.
///
/// These abort startup: a gateway is never built on top of a resource bundle
/// that could not produce its default image.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ResourceError {
    #[error("failed to read default thumbnail from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("default thumbnail at {path} is not a decodable image: {reason}")]
    InvalidImage { path: PathBuf, reason: String },
}

impl ResourceError {
    /// Creates a read failure for `path`.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a decode failure for `path`.
    #[must_use]
    pub fn invalid_image(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
