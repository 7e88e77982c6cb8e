//! The AI-backed lookup features and their history policies

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::HistoryError;
use crate::history::{HistoryConfig, HistoryStore};
use crate::storage::Persistence;

/// A lookup feature that keeps its own history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    TheologicalDictionary,
    PortugueseDictionary,
    Translator,
    Commentary,
    Timeline,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::TheologicalDictionary,
        Feature::PortugueseDictionary,
        Feature::Translator,
        Feature::Commentary,
        Feature::Timeline,
    ];

    /// Fixed substrate key of this feature's history
    pub fn storage_key(self) -> &'static str {
        match self {
            Feature::TheologicalDictionary => "paulo_theological_history",
            Feature::PortugueseDictionary => "paulo_portuguese_history",
            Feature::Translator => "paulo_translator_history",
            Feature::Commentary => "paulo_commentary_history",
            Feature::Timeline => "paulo_timeline_history",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Feature::TheologicalDictionary => "theological",
            Feature::PortugueseDictionary => "portuguese",
            Feature::Translator => "translator",
            Feature::Commentary => "commentary",
            Feature::Timeline => "timeline",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::TheologicalDictionary => "Dicionário Teológico",
            Feature::PortugueseDictionary => "Dicionário de Português",
            Feature::Translator => "Tradutor Bíblico",
            Feature::Commentary => "Comentário Bíblico",
            Feature::Timeline => "Linha do Tempo",
        }
    }

    /// Default retention policy.
    ///
    /// The translator keeps repeated queries as separate entries; every other
    /// feature moves a repeated query to the front.
    pub fn default_config(self) -> HistoryConfig {
        match self {
            Feature::Translator => HistoryConfig::allowing_duplicates(),
            _ => HistoryConfig::default(),
        }
    }

    /// Open this feature's history with `config`
    pub fn open_history<V>(
        self,
        persistence: Persistence,
        config: HistoryConfig,
    ) -> Result<HistoryStore<V>, HistoryError>
    where
        V: Clone + Serialize + DeserializeOwned,
    {
        HistoryStore::open(persistence, self.storage_key(), config)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Feature::ALL
            .into_iter()
            .find(|f| f.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Feature::ALL.iter().map(|f| f.slug()).collect();
                format!("unknown feature {s:?} (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: HashSet<_> = Feature::ALL.iter().map(|f| f.storage_key()).collect();
        assert_eq!(keys.len(), Feature::ALL.len());
    }

    #[test]
    fn test_only_translator_allows_duplicates() {
        for feature in Feature::ALL {
            let config = feature.default_config();
            assert_eq!(config.capacity, 20);
            assert_eq!(
                config.dedupe_by_normalized_key,
                feature != Feature::Translator,
                "{feature}"
            );
        }
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!("Timeline".parse::<Feature>().unwrap(), Feature::Timeline);
        assert!("gallery".parse::<Feature>().is_err());
        for feature in Feature::ALL {
            assert_eq!(feature.to_string().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_open_history_uses_feature_key() {
        let store: HistoryStore<String> = Feature::Commentary
            .open_history(Persistence::in_memory(), Feature::Commentary.default_config())
            .unwrap();
        assert_eq!(store.storage_key(), "paulo_commentary_history");
    }
}
