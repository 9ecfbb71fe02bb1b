use serde::{Deserialize, Serialize};
use std::fmt;

/// A network definition document.
///
/// An empty document means "not available yet" rather than an error: the
/// verified fetch primitive collapses both network failures and signature
/// failures into an empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ndf(String);

impl Ndf {
    /// Wrap document content
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// The empty ("not yet available") document
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns true if no document was obtained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Document length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the document content
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the document content
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Ndf {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ndf {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Ndf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ndf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
