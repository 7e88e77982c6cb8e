//! Result payloads stored in each feature's history

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Theological dictionary entries are free text
pub type TheologicalDefinition = String;

/// Portuguese dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub definition: String,
    /// Grammatical class, e.g. "substantivo"
    #[serde(rename = "class")]
    pub word_class: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationDirection {
    #[serde(rename = "pt-gr")]
    PortugueseToGreek,
    #[serde(rename = "gr-pt")]
    GreekToPortuguese,
    #[serde(rename = "pt-he")]
    PortugueseToHebrew,
    #[serde(rename = "he-pt")]
    HebrewToPortuguese,
}

impl TranslationDirection {
    pub const ALL: [TranslationDirection; 4] = [
        TranslationDirection::PortugueseToGreek,
        TranslationDirection::GreekToPortuguese,
        TranslationDirection::PortugueseToHebrew,
        TranslationDirection::HebrewToPortuguese,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TranslationDirection::PortugueseToGreek => "pt-gr",
            TranslationDirection::GreekToPortuguese => "gr-pt",
            TranslationDirection::PortugueseToHebrew => "pt-he",
            TranslationDirection::HebrewToPortuguese => "he-pt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TranslationDirection::PortugueseToGreek => "Português → Grego",
            TranslationDirection::GreekToPortuguese => "Grego → Português",
            TranslationDirection::PortugueseToHebrew => "Português → Hebraico",
            TranslationDirection::HebrewToPortuguese => "Hebraico → Português",
        }
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TranslationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| format!("unknown translation direction {code:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiblicalExample {
    pub verse: String,
    pub context: String,
}

/// Exegetical translation of a word or passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    pub meanings: String,
    pub exegesis: String,
    pub hermeneutics: String,
    #[serde(default)]
    pub biblical_examples: Vec<BiblicalExample>,
    #[serde(default)]
    pub thematic_concordance: Vec<String>,
}

/// Translator history value: the result together with the direction that
/// produced it, so reopening an entry restores both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub direction: TranslationDirection,
    pub result: TranslationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseCommentary {
    pub verse: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub commentary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub reference: String,
    pub historical_context: String,
    pub verse_by_verse: Vec<VerseCommentary>,
    pub theological_insights: Vec<String>,
    pub practical_application: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Estimated date, e.g. "c. 1446 a.C."
    pub year: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub figures: Vec<String>,
    pub event_reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub reference: String,
    pub period: String,
    pub events: Vec<TimelineEvent>,
}
