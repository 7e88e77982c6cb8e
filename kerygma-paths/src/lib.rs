//! XDG Base Directory paths for kerygma.
//!
//! Saved sermons, notes and lookup histories live under the data directory;
//! the user configuration file lives under the config directory. XDG paths
//! are used on every platform so a data directory can be moved between
//! machines without translation.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "kerygma";

/// Name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

/// Get the kerygma config directory.
///
/// Returns `$XDG_CONFIG_HOME/kerygma` if set, otherwise `~/.config/kerygma`.
///
/// # Examples
///
/// ```
/// use kerygma_paths::config_dir;
///
/// let config = config_dir();
/// assert!(config.ends_with("kerygma"));
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the kerygma data directory.
///
/// Returns `$XDG_DATA_HOME/kerygma` if set, otherwise `~/.local/share/kerygma`.
/// Every persisted collection is one JSON file in this directory.
///
/// # Examples
///
/// ```
/// use kerygma_paths::data_dir;
///
/// let sermons = data_dir().join("kerygma_sermons.json");
/// assert!(sermons.ends_with("kerygma_sermons.json"));
/// ```
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Path of the user configuration file.
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

fn xdg_dir(var: &str, home_relative: &str) -> PathBuf {
    // An empty XDG variable must be treated as unset.
    match std::env::var(var) {
        Ok(base) if !base.is_empty() => PathBuf::from(base).join(APP_DIR),
        _ => home_fallback(dirs::home_dir().as_deref(), home_relative),
    }
}

fn home_fallback(home: Option<&Path>, home_relative: &str) -> PathBuf {
    match home {
        Some(home) => home.join(home_relative).join(APP_DIR),
        None => PathBuf::from(home_relative).join(APP_DIR),
    }
}
