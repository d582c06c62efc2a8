//! Store key derivation for thumbnails.

use super::PageUrl;

/// Stable key a thumbnail is stored under.
///
/// Derived by hashing the page URL, so arbitrarily long URLs collapse to a
/// fixed-width key and equal URLs always land on the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey(pub String);

impl ThumbnailKey {
    /// Derives the key for a page URL.
    #[must_use]
    pub fn from_url(url: &PageUrl) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThumbnailKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
