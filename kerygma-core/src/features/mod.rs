//! Lookup features: identities, history policies and result payloads

mod kind;
mod payload;

pub use kind::Feature;
pub use payload::{
    BiblicalExample, Commentary, TheologicalDefinition, Timeline, TimelineEvent, Translation,
    TranslationDirection, TranslationResult, VerseCommentary, WordDefinition,
};
