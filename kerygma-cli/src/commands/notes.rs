//! Quick-note commands

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use kerygma_core::{NOTES_KEY, NoteColor, NoteRepository, QuickNote};

use super::{Context, truncate};

#[derive(Args, Debug)]
pub struct NotesArgs {
    #[command(subcommand)]
    pub command: NotesCommands,
}

#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// List notes, newest first
    List,
    /// Add a note
    Add {
        /// Note body
        content: String,
        /// Title (defaults to "Insight Ministerial")
        #[arg(long, default_value = "")]
        title: String,
        /// emerald, green, rose or amber
        #[arg(long, default_value_t = NoteColor::Emerald)]
        color: NoteColor,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

pub fn run(ctx: &Context, args: NotesArgs) -> Result<()> {
    let mut notes = NoteRepository::open(ctx.persistence.clone(), NOTES_KEY);

    match args.command {
        NotesCommands::List => {
            if notes.is_empty() {
                println!("No notes");
            }
            for note in notes.list() {
                println!("  {} - {} [{}] {}", note.id, note.title, note.color, note.created_at);
                println!("    {}", truncate(&note.content, 72));
            }
            Ok(())
        }
        NotesCommands::Add {
            content,
            title,
            color,
        } => {
            let note = QuickNote::new(&title, content, color)?;
            let id = note.id.clone();
            notes.upsert(note);
            println!("Added note {}", id);
            Ok(())
        }
        NotesCommands::Delete { id } => {
            if !notes.delete(&id) {
                bail!("No note with id {}", id);
            }
            println!("Deleted note {}", id);
            Ok(())
        }
    }
}
