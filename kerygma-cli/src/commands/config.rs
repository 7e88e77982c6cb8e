use crate::config::{ConfigLoader, KerygmaConfig};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use kerygma_core::Feature;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration (merged) and the effective history policies
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(config: &KerygmaConfig, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(config),
        ConfigCommands::Path => show_paths(config),
    }
}

fn show_config(config: &KerygmaConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", toml_str);

    println!("# effective history policies");
    for feature in Feature::ALL {
        let policy = config.history_config(feature);
        println!(
            "# {:<12} capacity={:<4} dedupe={:<5} key={}",
            feature.slug(),
            policy.capacity,
            policy.dedupe_by_normalized_key,
            feature.storage_key()
        );
    }
    Ok(())
}

/// Labelled locations the CLI reads from, in display order
fn paths(config: &KerygmaConfig) -> [(&'static str, PathBuf); 3] {
    [
        ("User config", ConfigLoader::user_config_path()),
        ("Project config", ConfigLoader::project_config_path()),
        ("Data dir", config.storage.data_dir.clone()),
    ]
}

fn show_paths(config: &KerygmaConfig) -> Result<()> {
    for (label, path) in paths(config) {
        println!("{:<16}{}", format!("{label}:"), path.display());
    }
    Ok(())
}
