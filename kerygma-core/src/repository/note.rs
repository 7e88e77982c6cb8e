//! Quick notes

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::store::{Record, Repository};
use crate::error::RepositoryError;

/// Storage key of the quick-notes collection
pub const NOTES_KEY: &str = "kerygma_notes";

/// Title given to notes saved without one
pub const DEFAULT_NOTE_TITLE: &str = "Insight Ministerial";

pub type NoteRepository = Repository<QuickNote>;

/// Card color of a note. Colors this build does not know load as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Emerald,
    Green,
    Rose,
    Amber,
}

impl NoteColor {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteColor::Emerald => "emerald",
            NoteColor::Green => "green",
            NoteColor::Rose => "rose",
            NoteColor::Amber => "amber",
        }
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emerald" => Ok(NoteColor::Emerald),
            "green" => Ok(NoteColor::Green),
            "rose" => Ok(NoteColor::Rose),
            "amber" => Ok(NoteColor::Amber),
            other => Err(format!(
                "unknown note color {other:?} (expected emerald, green, rose or amber)"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for NoteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(NoteColor::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(color = %raw, "unknown note color, using default");
            NoteColor::default()
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickNote {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
    pub created_at: String,
}

impl QuickNote {
    /// Build a note dated today. Blank content is rejected and a blank title
    /// falls back to [`DEFAULT_NOTE_TITLE`].
    pub fn new(
        title: &str,
        content: impl Into<String>,
        color: NoteColor,
    ) -> Result<Self, RepositoryError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(RepositoryError::InvalidRecord(
                "note content is empty".to_string(),
            ));
        }

        let title = match title.trim() {
            "" => DEFAULT_NOTE_TITLE.to_string(),
            t => t.to_string(),
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            color,
            created_at: Local::now().format("%d/%m/%Y").to_string(),
        })
    }
}

impl Record for QuickNote {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::storage::{KeyValueStore, MemoryStore, Persistence};

    #[test]
    fn test_blank_content_rejected() {
        let err = QuickNote::new("Título", "   ", NoteColor::Rose).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_blank_title_defaults() {
        let note = QuickNote::new("  ", "<b>orar</b>", NoteColor::default()).unwrap();
        assert_eq!(note.title, DEFAULT_NOTE_TITLE);
        assert_eq!(note.color, NoteColor::Emerald);
    }

    #[test]
    fn test_color_parse_and_serialize() {
        assert_eq!("Amber".parse::<NoteColor>().unwrap(), NoteColor::Amber);
        assert!("blue".parse::<NoteColor>().is_err());
        assert_eq!(serde_json::to_string(&NoteColor::Rose).unwrap(), "\"rose\"");
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = QuickNote::new("Ideia", "texto", NoteColor::Green).unwrap();
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["color"], "green");
    }

    #[test]
    fn test_notes_are_newest_first() {
        let mut notes = NoteRepository::open(Persistence::in_memory(), NOTES_KEY);
        let first = QuickNote::new("", "um", NoteColor::Emerald).unwrap();
        let second = QuickNote::new("", "dois", NoteColor::Emerald).unwrap();
        notes.upsert(first.clone());
        notes.upsert(second.clone());

        assert_eq!(notes.list(), vec![second, first.clone()]);
        assert!(notes.delete(&first.id));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_unknown_color_loads_as_default() {
        let color: NoteColor = serde_json::from_str("\"indigo\"").unwrap();
        assert_eq!(color, NoteColor::Emerald);
        let color: NoteColor = serde_json::from_str("null").unwrap();
        assert_eq!(color, NoteColor::Emerald);
    }

    #[test]
    fn test_unknown_color_keeps_collection() {
        let substrate = Arc::new(MemoryStore::new());
        substrate
            .set(
                NOTES_KEY,
                r#"[
                    {"id":"1","title":"a","content":"um","color":"indigo","createdAt":"01/01/2025"},
                    {"id":"2","title":"b","content":"dois","color":"rose","createdAt":"02/01/2025"}
                ]"#,
            )
            .unwrap();

        let mut notes = NoteRepository::open(Persistence::new(substrate.clone()), NOTES_KEY);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.get("1").unwrap().color, NoteColor::Emerald);
        assert_eq!(notes.get("2").unwrap().color, NoteColor::Rose);

        notes.upsert(QuickNote::new("", "três", NoteColor::Amber).unwrap());

        let stored: Vec<QuickNote> =
            serde_json::from_str(&substrate.get(NOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().any(|n| n.id == "1"));
    }
}
