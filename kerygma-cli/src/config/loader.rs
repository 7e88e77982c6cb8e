use super::types::{
    FeatureHistoryConfig, HistorySection, KerygmaConfig, RawHistorySection, RawKerygmaConfig,
    RawStorageConfig, StorageConfig,
};
use anyhow::{Context, Result};
use kerygma_core::Feature;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<KerygmaConfig> {
        Self::load_layers(&[Self::user_config_path(), Self::project_config_path()])
    }

    /// Get user config path
    pub fn user_config_path() -> PathBuf {
        kerygma_paths::config_file()
    }

    /// Get project config path
    /// Can be overridden with KERYGMA_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("KERYGMA_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join(kerygma_paths::CONFIG_FILE)
        } else {
            PathBuf::from(".kerygma").join(kerygma_paths::CONFIG_FILE)
        }
    }

    /// Merge every existing file in `paths`, later files overriding earlier ones
    pub fn load_layers(paths: &[PathBuf]) -> Result<KerygmaConfig> {
        let mut raw = RawKerygmaConfig::default();
        for path in paths {
            if let Some(layer) = Self::read_raw(path)? {
                raw = Self::merge_raw(raw, layer);
            }
        }
        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<Option<RawKerygmaConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let raw: RawKerygmaConfig = toml::from_str(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration layer");
        Ok(Some(raw))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawKerygmaConfig, overlay: RawKerygmaConfig) -> RawKerygmaConfig {
        let mut features = base.history.features;
        for (name, over) in overlay.history.features {
            let merged = match features.get(&name) {
                Some(existing) => FeatureHistoryConfig {
                    capacity: over.capacity.or(existing.capacity),
                    dedupe_by_normalized_key: over
                        .dedupe_by_normalized_key
                        .or(existing.dedupe_by_normalized_key),
                },
                None => over,
            };
            features.insert(name, merged);
        }

        RawKerygmaConfig {
            storage: RawStorageConfig {
                data_dir: overlay.storage.data_dir.or(base.storage.data_dir),
            },
            history: RawHistorySection {
                capacity: overlay.history.capacity.or(base.history.capacity),
                features,
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawKerygmaConfig) -> KerygmaConfig {
        for name in raw.history.features.keys() {
            if name.parse::<Feature>().is_err() {
                warn!(feature = %name, "ignoring history settings for unknown feature");
            }
        }

        let defaults = HistorySection::default();
        KerygmaConfig {
            storage: raw
                .storage
                .data_dir
                .map(|data_dir| StorageConfig { data_dir })
                .unwrap_or_default(),
            history: HistorySection {
                capacity: raw.history.capacity.unwrap_or(defaults.capacity),
                features: raw.history.features,
            },
        }
    }
}
