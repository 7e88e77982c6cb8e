//! User-authored collections: sermons and quick notes

mod note;
mod sermon;
mod store;

pub use note::{DEFAULT_NOTE_TITLE, NOTES_KEY, NoteColor, NoteRepository, QuickNote};
pub use sermon::{SERMONS_KEY, Sermon, SermonRepository, Theme};
pub use store::{Record, Repository, UpsertOutcome};
