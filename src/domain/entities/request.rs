//! Request identity types.

/// Caller-supplied token correlating one lookup with its eventual response.
///
/// The gateway never generates these. Uniqueness among concurrently
/// outstanding lookups is the caller's responsibility; ids may be reused
/// freely once a response has been emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Creates a new `RequestId`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// URL of the page a thumbnail is wanted for.
///
/// Treated as an opaque string; backends decide how to key on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageUrl(pub String);

impl PageUrl {
    /// Creates a new `PageUrl` from any string-like input.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PageUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PageUrl {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
