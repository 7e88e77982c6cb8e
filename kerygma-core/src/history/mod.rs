//! Per-feature lookup histories

mod store;
mod types;

pub use store::{HistoryStore, SharedHistory};
pub use types::{DEFAULT_CAPACITY, HistoryConfig, HistoryEntry, normalize_key};
