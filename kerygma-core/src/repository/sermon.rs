//! Saved sermons

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::{Record, Repository};

/// Storage key of the sermon collection
pub const SERMONS_KEY: &str = "kerygma_sermons";

/// The user's sermon collection
pub type SermonRepository = Repository<Sermon>;

/// Sermon category. `Geral` doubles as the "any theme" filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Ofertório")]
    Ofertorio,
    #[serde(rename = "Doutrina")]
    Doutrina,
    #[serde(rename = "Sexta Profética")]
    SextaProfetica,
    #[serde(rename = "Celebrando em Família")]
    CelebrandoEmFamilia,
    #[serde(rename = "Geral")]
    Geral,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Ofertorio,
        Theme::Doutrina,
        Theme::SextaProfetica,
        Theme::CelebrandoEmFamilia,
        Theme::Geral,
    ];

    /// Display label, identical to the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Theme::Ofertorio => "Ofertório",
            Theme::Doutrina => "Doutrina",
            Theme::SextaProfetica => "Sexta Profética",
            Theme::CelebrandoEmFamilia => "Celebrando em Família",
            Theme::Geral => "Geral",
        }
    }

    /// ASCII form accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Theme::Ofertorio => "ofertorio",
            Theme::Doutrina => "doutrina",
            Theme::SextaProfetica => "sexta-profetica",
            Theme::CelebrandoEmFamilia => "familia",
            Theme::Geral => "geral",
        }
    }

    /// Whether a sermon of theme `other` passes this theme as a filter
    pub fn admits(self, other: Theme) -> bool {
        self == Theme::Geral || self == other
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.slug() == wanted || t.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Theme::ALL.iter().map(|t| t.slug()).collect();
                format!("unknown theme {s:?} (expected one of: {})", known.join(", "))
            })
    }
}

/// A finished sermon as handed over by the authoring flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sermon {
    pub id: String,
    pub title: String,
    pub theme: Theme,
    /// Rich-text body, opaque to storage
    pub content: String,
    pub date: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Sermon {
    /// New sermon with a fresh id, dated today (`dd/mm/yyyy`)
    pub fn new(title: impl Into<String>, theme: Theme, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            theme,
            content: content.into(),
            date: Local::now().format("%d/%m/%Y").to_string(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

impl Record for Sermon {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Repository<Sermon> {
    /// Sermons of `theme`, or all of them for `None` and `Some(Theme::Geral)`
    pub fn list_by_theme(&self, theme: Option<Theme>) -> Vec<Sermon> {
        let filter = theme.unwrap_or(Theme::Geral);
        self.iter()
            .filter(|s| filter.admits(s.theme))
            .cloned()
            .collect()
    }

    /// Theme-filtered sermons whose title contains `text`, ignoring case
    pub fn search(&self, theme: Option<Theme>, text: &str) -> Vec<Sermon> {
        let needle = text.to_lowercase();
        let filter = theme.unwrap_or(Theme::Geral);
        self.iter()
            .filter(|s| filter.admits(s.theme))
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
