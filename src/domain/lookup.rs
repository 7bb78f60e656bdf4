//! Field selector for mapping lookups.

use crate::domain::entities::UrlMapping;

/// Which side of a [`UrlMapping`] a lookup matches on or returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Token,
    Original,
}

impl LookupField {
    /// Reads this field from a mapping.
    pub fn select(self, mapping: &UrlMapping) -> &str {
        match self {
            LookupField::Token => &mapping.token,
            LookupField::Original => &mapping.original,
        }
    }

    /// The opposite field.
    pub fn counterpart(self) -> Self {
        match self {
            LookupField::Token => LookupField::Original,
            LookupField::Original => LookupField::Token,
        }
    }
}

/// A value to match against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub field: LookupField,
    pub key: String,
}

impl Lookup {
    pub fn token(key: impl Into<String>) -> Self {
        Self {
            field: LookupField::Token,
            key: key.into(),
        }
    }

    pub fn original(key: impl Into<String>) -> Self {
        Self {
            field: LookupField::Original,
            key: key.into(),
        }
    }

    /// Returns true if `mapping` matches this lookup.
    pub fn matches(&self, mapping: &UrlMapping) -> bool {
        self.field.select(mapping) == self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let mapping = UrlMapping::new("https://example.com", "apple");
        assert_eq!(LookupField::Token.select(&mapping), "apple");
        assert_eq!(LookupField::Original.select(&mapping), "https://example.com");
    }

    #[test]
    fn test_counterpart() {
        assert_eq!(LookupField::Token.counterpart(), LookupField::Original);
        assert_eq!(LookupField::Original.counterpart(), LookupField::Token);
    }

    #[test]
    fn test_lookup_matches() {
        let mapping = UrlMapping::new("https://example.com", "apple");
        assert!(Lookup::token("apple").matches(&mapping));
        assert!(Lookup::original("https://example.com").matches(&mapping));
        assert!(!Lookup::token("https://example.com").matches(&mapping));
    }
}
