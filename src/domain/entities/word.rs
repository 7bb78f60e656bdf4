//! Dictionary word entity and pool statistics.

use serde::Serialize;

/// A candidate token and whether a live mapping currently owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryWord {
    pub word: String,
    pub used: bool,
}

impl DictionaryWord {
    pub fn new(word: impl Into<String>, used: bool) -> Self {
        Self {
            word: word.into(),
            used,
        }
    }
}

/// Snapshot of the dictionary pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PoolStats {
    pub total: i64,
    pub unused: i64,
}

impl PoolStats {
    pub fn used(&self) -> i64 {
        self.total - self.unused
    }

    pub fn is_exhausted(&self) -> bool {
        self.unused == 0
    }
}
