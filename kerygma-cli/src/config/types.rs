use kerygma_core::{Feature, HistoryConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawKerygmaConfig {
    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub history: RawHistorySection,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    /// Directory holding the persisted collections
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawHistorySection {
    /// Capacity applied to every feature without its own override
    pub capacity: Option<usize>,

    /// Per-feature overrides, keyed by feature slug
    #[serde(default)]
    pub features: BTreeMap<String, FeatureHistoryConfig>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KerygmaConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub history: HistorySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: kerygma_paths::data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySection {
    pub capacity: usize,

    #[serde(default)]
    pub features: BTreeMap<String, FeatureHistoryConfig>,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            capacity: kerygma_core::history::DEFAULT_CAPACITY,
            features: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeatureHistoryConfig {
    pub capacity: Option<usize>,
    pub dedupe_by_normalized_key: Option<bool>,
}

impl KerygmaConfig {
    /// History policy for `feature`: its override, then the global capacity,
    /// then the feature's built-in default
    pub fn history_config(&self, feature: Feature) -> HistoryConfig {
        let defaults = feature.default_config();
        let overrides = self
            .history
            .features
            .get(feature.slug())
            .copied()
            .unwrap_or_default();

        HistoryConfig {
            capacity: overrides.capacity.unwrap_or(self.history.capacity),
            dedupe_by_normalized_key: overrides
                .dedupe_by_normalized_key
                .unwrap_or(defaults.dedupe_by_normalized_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = KerygmaConfig::default();
        assert_eq!(config.history.capacity, 20);
        assert!(config.history.features.is_empty());
        assert!(config.storage.data_dir.ends_with("kerygma"));
    }

    #[test]
    fn test_history_config_defaults_follow_feature() {
        let config = KerygmaConfig::default();
        assert!(
            !config
                .history_config(Feature::Translator)
                .dedupe_by_normalized_key
        );
        assert!(
            config
                .history_config(Feature::Commentary)
                .dedupe_by_normalized_key
        );
    }

    #[test]
    fn test_history_config_applies_overrides() {
        let mut config = KerygmaConfig::default();
        config.history.capacity = 10;
        config.history.features.insert(
            "translator".to_string(),
            FeatureHistoryConfig {
                capacity: Some(50),
                dedupe_by_normalized_key: Some(true),
            },
        );

        let translator = config.history_config(Feature::Translator);
        assert_eq!(translator.capacity, 50);
        assert!(translator.dedupe_by_normalized_key);

        assert_eq!(config.history_config(Feature::Timeline).capacity, 10);
    }

    #[test]
    fn test_raw_config_partial_parsing() {
        let toml_str = r#"
[history]
capacity = 30

[history.features.timeline]
dedupe_by_normalized_key = false
"#;
        let raw: RawKerygmaConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(raw.history.capacity, Some(30));
        assert!(raw.storage.data_dir.is_none());
        let timeline = raw.history.features["timeline"];
        assert_eq!(timeline.capacity, None);
        assert_eq!(timeline.dedupe_by_normalized_key, Some(false));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = KerygmaConfig {
            storage: StorageConfig {
                data_dir: PathBuf::from("/srv/kerygma"),
            },
            ..Default::default()
        };
        config.history.features.insert(
            "commentary".to_string(),
            FeatureHistoryConfig {
                capacity: Some(5),
                dedupe_by_normalized_key: None,
            },
        );

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: KerygmaConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.storage.data_dir, PathBuf::from("/srv/kerygma"));
        assert_eq!(parsed.history.features["commentary"].capacity, Some(5));
    }
}
