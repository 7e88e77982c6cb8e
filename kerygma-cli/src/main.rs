use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod config;

use commands::Context;
use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "kerygma", about = "Sermons, notes and lookup histories")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this data directory instead of the configured one
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Inspect and prune a feature's lookup history
    History(commands::history::HistoryArgs),
    /// Manage quick notes
    Notes(commands::notes::NotesArgs),
    /// Manage saved sermons
    Sermons(commands::sermons::SermonsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    debug!(data_dir = %config.storage.data_dir.display(), "resolved configuration");

    match cli.command {
        Commands::Config(args) => commands::config::run(&config, args),
        Commands::History(args) => commands::history::run(&Context::new(config), args),
        Commands::Notes(args) => commands::notes::run(&Context::new(config), args),
        Commands::Sermons(args) => commands::sermons::run(&Context::new(config), args),
    }
}
