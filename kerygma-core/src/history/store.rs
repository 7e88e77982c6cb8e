//! Bounded, persisted history of lookups for one feature

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{HistoryConfig, HistoryEntry, normalize_key};
use crate::error::HistoryError;
use crate::storage::Persistence;

/// A history store shared between a feature's lookup flow and its readers
pub type SharedHistory<V> = Arc<Mutex<HistoryStore<V>>>;

/// Most-recent-first history of query/result pairs.
///
/// The in-memory sequence is authoritative. Every mutation is mirrored to the
/// substrate under this store's key; a failed save is logged and counted but
/// never rolls the mutation back.
#[derive(Debug)]
pub struct HistoryStore<V> {
    persistence: Persistence,
    storage_key: String,
    config: HistoryConfig,
    entries: Vec<HistoryEntry<V>>,
    persist_failures: u64,
}

impl<V> HistoryStore<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    /// Open the history stored under `storage_key`, rehydrating any saved
    /// entries. Missing or corrupt storage yields an empty history.
    pub fn open(
        persistence: Persistence,
        storage_key: impl Into<String>,
        config: HistoryConfig,
    ) -> Result<Self, HistoryError> {
        if config.capacity == 0 {
            return Err(HistoryError::InvalidCapacity);
        }

        let mut store = Self {
            persistence,
            storage_key: storage_key.into(),
            config,
            entries: Vec::new(),
            persist_failures: 0,
        };
        store.reload();
        Ok(store)
    }

    /// Replace the in-memory entries with what the substrate holds
    pub fn reload(&mut self) {
        let loaded: Vec<HistoryEntry<V>> = self.persistence.load(&self.storage_key, Vec::new());
        let loaded_len = loaded.len();
        self.entries = self.conform(loaded);
        debug!(
            key = %self.storage_key,
            loaded = loaded_len,
            kept = self.entries.len(),
            "rehydrated history"
        );
    }

    /// Record a successful lookup and return the new entry.
    ///
    /// With deduplication on, an earlier entry for the same normalized key is
    /// dropped first, so the query moves to the front with its new value.
    pub fn record(&mut self, key: impl Into<String>, value: V) -> HistoryEntry<V> {
        let entry = HistoryEntry::new(key, value);

        if self.config.dedupe_by_normalized_key {
            let normalized = normalize_key(&entry.key);
            self.entries.retain(|e| normalize_key(&e.key) != normalized);
        }
        self.entries.insert(0, entry.clone());
        let evicted = self.entries.len().saturating_sub(self.config.capacity);
        self.entries.truncate(self.config.capacity);

        debug!(
            key = %self.storage_key,
            id = %entry.id,
            len = self.entries.len(),
            evicted,
            "recorded history entry"
        );
        self.persist();
        entry
    }

    /// Remove the entry with `id`; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            debug!(key = %self.storage_key, id, "removed history entry");
            self.persist();
        }
        removed
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!(key = %self.storage_key, "cleared history");
        self.persist();
    }

    /// Snapshot of the entries, most recent first
    pub fn list(&self) -> Vec<HistoryEntry<V>> {
        self.entries.clone()
    }

    /// Most recent entry whose normalized key matches `key`
    pub fn find_by_key(&self, key: &str) -> Option<HistoryEntry<V>> {
        self.entries.iter().find(|e| e.matches_key(key)).cloned()
    }

    pub fn get(&self, id: &str) -> Option<HistoryEntry<V>> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Number of mutations whose save to the substrate failed
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    /// Wrap the store for sharing with a lookup flow
    pub fn into_shared(self) -> SharedHistory<V> {
        Arc::new(Mutex::new(self))
    }

    /// Re-establish the capacity and uniqueness invariants on loaded data
    fn conform(&self, mut entries: Vec<HistoryEntry<V>>) -> Vec<HistoryEntry<V>> {
        if self.config.dedupe_by_normalized_key {
            let mut seen = HashSet::new();
            entries.retain(|e| seen.insert(normalize_key(&e.key)));
        }
        entries.truncate(self.config.capacity);
        entries
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.storage_key, &self.entries) {
            self.persist_failures += 1;
            warn!(
                key = %self.storage_key,
                error = %e,
                "failed to persist history, keeping in-memory state"
            );
        }
    }
}
