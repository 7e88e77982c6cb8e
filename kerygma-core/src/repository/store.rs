//! Ordered, id-keyed collection of user-authored records

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::storage::Persistence;

/// A record that can live in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Identifier, unique within one repository
    fn id(&self) -> &str;
}

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was placed at the front
    Inserted,
    /// An existing record was replaced in place
    Updated,
}

/// Unbounded collection of records, most recently created first.
///
/// Updating a record keeps its position. The whole collection is saved after
/// each mutation; as with histories, the in-memory state is authoritative.
#[derive(Debug)]
pub struct Repository<T> {
    persistence: Persistence,
    storage_key: String,
    records: Vec<T>,
    persist_failures: u64,
}

impl<T: Record> Repository<T> {
    /// Open the repository stored under `storage_key`
    pub fn open(persistence: Persistence, storage_key: impl Into<String>) -> Self {
        let mut repository = Self {
            persistence,
            storage_key: storage_key.into(),
            records: Vec::new(),
            persist_failures: 0,
        };
        repository.reload();
        repository
    }

    /// Replace the in-memory records wholesale with what the substrate holds
    pub fn reload(&mut self) {
        let mut loaded: Vec<T> = self.persistence.load(&self.storage_key, Vec::new());
        let mut seen = HashSet::new();
        loaded.retain(|r| seen.insert(r.id().to_string()));
        self.records = loaded;
        debug!(key = %self.storage_key, len = self.records.len(), "rehydrated repository");
    }

    /// Insert `record` at the front, or replace the record with the same id
    pub fn upsert(&mut self, record: T) -> UpsertOutcome {
        let outcome = match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                self.records.insert(0, record);
                UpsertOutcome::Inserted
            }
        };
        debug!(key = %self.storage_key, ?outcome, len = self.records.len(), "upserted record");
        self.persist();
        outcome
    }

    /// Delete the record with `id`; returns whether one was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        if removed {
            debug!(key = %self.storage_key, id, "deleted record");
            self.persist();
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Snapshot of every record in repository order
    pub fn list(&self) -> Vec<T> {
        self.records.clone()
    }

    /// The `limit` most recently created records
    pub fn recent(&self, limit: usize) -> Vec<T> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Number of mutations whose save to the substrate failed
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.storage_key, &self.records) {
            self.persist_failures += 1;
            warn!(
                key = %self.storage_key,
                error = %e,
                "failed to persist repository, keeping in-memory state"
            );
        }
    }
}
