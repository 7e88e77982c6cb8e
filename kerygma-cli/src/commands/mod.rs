pub mod config;
pub mod history;
pub mod notes;
pub mod sermons;

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use kerygma_core::{FileStore, Persistence};

use crate::config::KerygmaConfig;

/// Resolved configuration plus the persistence every command opens stores on
pub struct Context {
    pub config: KerygmaConfig,
    pub persistence: Persistence,
}

impl Context {
    pub fn new(config: KerygmaConfig) -> Self {
        let store = FileStore::new(&config.storage.data_dir);
        Self {
            persistence: Persistence::new(Arc::new(store)),
            config,
        }
    }
}

/// Local wall-clock rendering used in listings
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        single_line
    } else {
        let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
