//! Whole-collection persistence over a key-value substrate

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::substrate::{KeyValueStore, MemoryStore};
use crate::error::StorageError;

/// Loads and saves whole collections as JSON under a storage key.
///
/// Loading never fails: a missing, unreadable or corrupt record yields the
/// caller's fallback, and the corrupt record is replaced by the next save.
/// Cloning shares the underlying substrate.
#[derive(Clone)]
pub struct Persistence {
    substrate: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        Self { substrate }
    }

    /// Persistence over a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load the collection stored under `key`, or `fallback`
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.substrate.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored collection, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored collection is corrupt, using fallback");
                fallback
            }
        }
    }

    /// Serialize `collection` and overwrite whatever is stored under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, collection: &T) -> Result<(), StorageError> {
        let content = serde_json::to_string(collection)?;
        self.substrate.set(key, &content)?;
        debug!(key, bytes = content.len(), "saved collection");
        Ok(())
    }
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        tags: Vec<String>,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "Graça".into(),
                tags: vec!["soteriologia".into()],
            },
            Item {
                name: "Kerygma".into(),
                tags: vec![],
            },
        ]
    }

    #[test]
    fn test_load_missing_returns_fallback() {
        let persistence = Persistence::in_memory();
        let loaded: Vec<Item> = persistence.load("absent", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let persistence = Persistence::in_memory();
        persistence.save("items", &items()).unwrap();
        let loaded: Vec<Item> = persistence.load("items", Vec::new());
        assert_eq!(loaded, items());
    }

    #[test]
    fn test_load_corrupt_returns_fallback() {
        let substrate = Arc::new(MemoryStore::new());
        substrate.set("items", "{not json").unwrap();
        let persistence = Persistence::new(substrate);

        let fallback = vec![Item {
            name: "fallback".into(),
            tags: vec![],
        }];
        let loaded: Vec<Item> = persistence.load("items", fallback.clone());
        assert_eq!(loaded, fallback);
    }

    #[test]
    fn test_load_wrong_shape_returns_fallback() {
        let substrate = Arc::new(MemoryStore::new());
        substrate.set("items", r#"{"name": "not a list"}"#).unwrap();
        let persistence = Persistence::new(substrate);

        let loaded: Vec<Item> = persistence.load("items", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_empty_collection_clears() {
        let persistence = Persistence::in_memory();
        persistence.save("items", &items()).unwrap();
        persistence.save("items", &Vec::<Item>::new()).unwrap();
        persistence.save("items", &Vec::<Item>::new()).unwrap();

        let loaded: Vec<Item> = persistence.load("items", items());
        assert!(loaded.is_empty());
    }
}
