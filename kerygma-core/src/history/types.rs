//! History entry and policy types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of entries a feature history keeps
pub const DEFAULT_CAPACITY: usize = 20;

/// One past query and the result it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry<V> {
    pub id: String,
    /// The query as the user typed it
    pub key: String,
    pub value: V,
    pub recorded_at: DateTime<Utc>,
}

impl<V> HistoryEntry<V> {
    /// Create an entry with a fresh id, stamped now
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.into(),
            value,
            recorded_at: Utc::now(),
        }
    }

    /// Whether this entry's key matches `key` after normalization
    pub fn matches_key(&self, key: &str) -> bool {
        normalize_key(&self.key) == normalize_key(key)
    }
}

/// Retention policy for one history store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of entries kept; older entries are evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Replace an earlier entry for the same query instead of keeping both
    #[serde(default = "default_true")]
    pub dedupe_by_normalized_key: bool,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dedupe_by_normalized_key: true,
        }
    }
}

impl HistoryConfig {
    /// A policy that keeps every repeated query as its own entry
    pub fn allowing_duplicates() -> Self {
        Self {
            dedupe_by_normalized_key: false,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Comparison form of a query: trimmed and lowercased
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
