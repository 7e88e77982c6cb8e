//! Sermon collection commands

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use kerygma_core::{SERMONS_KEY, Sermon, SermonRepository, Theme, UpsertOutcome};
use tracing::info;

use super::Context;

/// Sermons arguments
#[derive(Args, Debug)]
pub struct SermonsArgs {
    #[command(subcommand)]
    pub command: SermonsCommands,
}

/// Sermons subcommands
#[derive(Subcommand, Debug)]
pub enum SermonsCommands {
    /// List saved sermons, newest first
    List {
        /// Only sermons of this theme (geral matches all)
        #[arg(long)]
        theme: Option<Theme>,
        /// Only sermons whose title contains this text
        #[arg(long)]
        search: Option<String>,
        /// Show at most this many sermons
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print one sermon
    Show {
        /// Sermon ID
        id: String,
    },
    /// Save a sermon from a JSON file, replacing any sermon with the same ID
    Save {
        /// Path to the sermon JSON
        file: PathBuf,
    },
    /// Delete a sermon
    Delete {
        /// Sermon ID
        id: String,
    },
}

/// Run sermons command
pub fn run(ctx: &Context, args: SermonsArgs) -> Result<()> {
    let mut sermons = SermonRepository::open(ctx.persistence.clone(), SERMONS_KEY);

    match args.command {
        SermonsCommands::List {
            theme,
            search,
            limit,
        } => {
            let (shown, matched) = select(&sermons, theme, search.as_deref(), limit);
            print_list(&shown, matched);
            Ok(())
        }
        SermonsCommands::Show { id } => match sermons.get(&id) {
            Some(sermon) => {
                print_sermon(sermon);
                Ok(())
            }
            None => bail!("No sermon with id {}", id),
        },
        SermonsCommands::Save { file } => {
            let sermon = read_sermon(&file)?;
            let id = sermon.id.clone();
            let outcome = sermons.upsert(sermon);
            info!(id = %id, ?outcome, "saved sermon");
            match outcome {
                UpsertOutcome::Inserted => println!("Added sermon {}", id),
                UpsertOutcome::Updated => println!("Updated sermon {}", id),
            }
            Ok(())
        }
        SermonsCommands::Delete { id } => {
            if !sermons.delete(&id) {
                bail!("No sermon with id {}", id);
            }
            println!("Deleted sermon {}", id);
            Ok(())
        }
    }
}

fn read_sermon(file: &Path) -> Result<Sermon> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let sermon: Sermon = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid sermon", file.display()))?;
    if sermon.id.trim().is_empty() {
        bail!("{} has an empty sermon id", file.display());
    }
    Ok(sermon)
}

/// Sermons to show, plus how many matched before `limit` applied
fn select(
    sermons: &SermonRepository,
    theme: Option<Theme>,
    search: Option<&str>,
    limit: Option<usize>,
) -> (Vec<Sermon>, usize) {
    if theme.is_none() && search.is_none() {
        let shown = sermons.recent(limit.unwrap_or(usize::MAX));
        return (shown, sermons.len());
    }

    let mut found = match search {
        Some(text) => sermons.search(theme, text),
        None => sermons.list_by_theme(theme),
    };
    let matched = found.len();
    if let Some(limit) = limit {
        found.truncate(limit);
    }
    (found, matched)
}

fn print_list(sermons: &[Sermon], matched: usize) {
    if sermons.is_empty() {
        println!("No sermons found");
        return;
    }

    for sermon in sermons {
        println!("  {} - {}", sermon.id, sermon.title);
        println!("    {} | {}", sermon.theme, sermon.date);
    }
    if sermons.len() < matched {
        println!();
        println!("  … {} more", matched - sermons.len());
    }
}

fn print_sermon(sermon: &Sermon) {
    println!("{}", sermon.title);
    println!("id: {}", sermon.id);
    println!("theme: {}", sermon.theme);
    println!("date: {}", sermon.date);
    if !sermon.tags.is_empty() {
        let tags: Vec<_> = sermon.tags.iter().map(String::as_str).collect();
        println!("tags: {}", tags.join(", "));
    }
    println!();
    if sermon.content.is_empty() {
        println!("(sem conteúdo)");
    } else {
        println!("{}", sermon.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerygma_core::Persistence;
    use tempfile::TempDir;

    fn collection() -> SermonRepository {
        let mut sermons = SermonRepository::open(Persistence::in_memory(), SERMONS_KEY);
        for (title, theme) in [
            ("Graça abundante", Theme::Geral),
            ("O lar cristão", Theme::CelebrandoEmFamilia),
            ("Graça no lar", Theme::CelebrandoEmFamilia),
        ] {
            sermons.upsert(Sermon::new(title, theme, ""));
        }
        sermons
    }

    #[test]
    fn test_select_unfiltered_takes_most_recent() {
        let sermons = collection();
        let (shown, matched) = select(&sermons, None, None, Some(2));
        let titles: Vec<_> = shown.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Graça no lar", "O lar cristão"]);
        assert_eq!(matched, 3);
    }

    #[test]
    fn test_select_filtered_counts_before_limit() {
        let sermons = collection();
        let (shown, matched) = select(&sermons, None, Some("graça"), Some(1));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Graça no lar");
        assert_eq!(matched, 2);

        let (shown, matched) = select(&sermons, Some(Theme::CelebrandoEmFamilia), None, None);
        assert_eq!((shown.len(), matched), (2, 2));
    }

    #[test]
    fn test_read_sermon_from_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sermon.json");
        std::fs::write(
            &path,
            r#"{"id":"s1","title":"O Filho Pródigo","theme":"Celebrando em Família",
                "content":"<p>Lucas 15</p>","date":"05/05/2025","tags":["família","Lucas 15"]}"#,
        )
        .unwrap();

        let sermon = read_sermon(&path).unwrap();
        assert_eq!(sermon.theme, Theme::CelebrandoEmFamilia);
        assert_eq!(sermon.tags.len(), 2);
    }

    #[test]
    fn test_read_sermon_rejects_empty_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sermon.json");
        std::fs::write(
            &path,
            r#"{"id":" ","title":"t","theme":"Geral","content":"","date":""}"#,
        )
        .unwrap();

        assert!(read_sermon(&path).is_err());
    }

    #[test]
    fn test_read_sermon_rejects_unknown_theme() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sermon.json");
        std::fs::write(
            &path,
            r#"{"id":"1","title":"t","theme":"Liturgia","content":"","date":""}"#,
        )
        .unwrap();

        let err = read_sermon(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid sermon"));
    }
}
