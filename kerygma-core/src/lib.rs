//! kerygma-core: storage core of the kerygma sermon workbench
//!
//! Every AI-backed lookup feature keeps a bounded history of its past
//! results, and the user's sermons and notes live in id-keyed repositories.
//! Both persist whole collections as JSON through the same adapter:
//!
//! - **Substrate** - [`KeyValueStore`] with [`FileStore`] and [`MemoryStore`]
//! - **Adapter** - [`Persistence`], corruption-tolerant load and whole-collection save
//! - **Histories** - [`HistoryStore`], most-recent-first, capacity-bounded, optionally deduplicated
//! - **Repositories** - [`Repository`], [`SermonRepository`] and [`NoteRepository`]
//! - **Lookups** - [`Lookup`] runs a [`Generator`] and records successful results
//!
//! # Quick Start
//!
//! ```
//! use kerygma_core::{Feature, HistoryStore, Persistence};
//!
//! let persistence = Persistence::in_memory();
//! let feature = Feature::TheologicalDictionary;
//! let mut history: HistoryStore<String> = feature
//!     .open_history(persistence.clone(), feature.default_config())
//!     .unwrap();
//!
//! history.record("Graça", "Favor imerecido de Deus".to_string());
//! history.record("graça ", "Dom gratuito".to_string());
//!
//! assert_eq!(history.len(), 1);
//! assert_eq!(history.list()[0].value, "Dom gratuito");
//! ```
//!
//! Two processes sharing one substrate do not coordinate: each saves its
//! whole collection, so the last save wins.

pub mod error;
pub mod features;
pub mod history;
pub mod lookup;
pub mod repository;
pub mod storage;

pub use error::{
    GenerateError, HistoryError, KerygmaError, LookupError, RepositoryError, StorageError,
};
pub use features::{
    Commentary, Feature, TheologicalDefinition, Timeline, Translation, TranslationDirection,
    TranslationResult, WordDefinition,
};
pub use history::{HistoryConfig, HistoryEntry, HistoryStore, SharedHistory};
pub use lookup::{Generator, Lookup, MockGenerator};
pub use repository::{
    NOTES_KEY, NoteColor, NoteRepository, QuickNote, Record, Repository, SERMONS_KEY, Sermon,
    SermonRepository, Theme, UpsertOutcome,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
