//! Mapping entity binding an original URL to a dictionary token.

use serde::Serialize;

/// A live association between an original URL and its short token.
///
/// Both fields are unique among live mappings, and `token` always names a
/// dictionary word currently marked used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMapping {
    pub original: String,
    pub token: String,
}

impl UrlMapping {
    /// Creates a new mapping.
    pub fn new(original: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            token: token.into(),
        }
    }
}

/// Outcome of a shortening request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// The URL was already mapped; no token was drawn.
    Existing(UrlMapping),
    /// A fresh token was drawn from the pool and bound to the URL.
    Created(UrlMapping),
}

impl Allocation {
    pub fn mapping(&self) -> &UrlMapping {
        match self {
            Allocation::Existing(mapping) | Allocation::Created(mapping) => mapping,
        }
    }

    pub fn into_mapping(self) -> UrlMapping {
        match self {
            Allocation::Existing(mapping) | Allocation::Created(mapping) => mapping,
        }
    }

    /// Returns true if this call drew a new token.
    pub fn is_new(&self) -> bool {
        matches!(self, Allocation::Created(_))
    }
}
