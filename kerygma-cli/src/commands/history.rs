//! Lookup history commands

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use kerygma_core::{Feature, HistoryEntry, HistoryStore};
use serde_json::Value;
use tracing::info;

use super::{Context, format_timestamp, truncate};

/// History arguments
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Feature whose history to inspect (theological, portuguese, translator, commentary, timeline)
    pub feature: Feature,

    #[command(subcommand)]
    pub command: HistoryCommands,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List entries, most recent first
    List {
        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored result of one entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Find the most recent entry for a query
    Find {
        /// Query text (case and surrounding spaces are ignored)
        query: String,
    },
    /// Remove one entry
    Remove {
        /// Entry ID
        id: String,
    },
    /// Remove every entry
    Clear,
}

/// Run history command
pub fn run(ctx: &Context, args: HistoryArgs) -> Result<()> {
    let feature = args.feature;
    let mut store: HistoryStore<Value> =
        feature.open_history(ctx.persistence.clone(), ctx.config.history_config(feature))?;

    match args.command {
        HistoryCommands::List { json } => list(feature, &store, json),
        HistoryCommands::Show { id } => match store.get(&id) {
            Some(entry) => show(&entry),
            None => bail!("No {} history entry with id {}", feature, id),
        },
        HistoryCommands::Find { query } => match store.find_by_key(&query) {
            Some(entry) => show(&entry),
            None => {
                println!("No {} history entry for {:?}", feature, query);
                Ok(())
            }
        },
        HistoryCommands::Remove { id } => {
            if !store.remove(&id) {
                bail!("No {} history entry with id {}", feature, id);
            }
            info!(feature = %feature, id = %id, "removed history entry");
            println!("Removed {}", id);
            Ok(())
        }
        HistoryCommands::Clear => {
            let count = store.len();
            store.clear();
            println!("Cleared {} {} history entries", count, feature);
            Ok(())
        }
    }
}

fn list(feature: Feature, store: &HistoryStore<Value>, json: bool) -> Result<()> {
    let entries = store.list();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No {} history", feature.label());
        return Ok(());
    }

    let policy = if store.config().dedupe_by_normalized_key {
        ""
    } else {
        ", repeated queries kept"
    };
    println!(
        "{} ({}/{}{}):",
        feature.label(),
        entries.len(),
        store.capacity(),
        policy
    );
    println!();
    for entry in entries {
        println!("  {} - {}", entry.id, entry.key);
        println!(
            "    {}  {}",
            format_timestamp(entry.recorded_at),
            summarize(&entry.value)
        );
    }
    Ok(())
}

fn show(entry: &HistoryEntry<Value>) -> Result<()> {
    println!("{} ({})", entry.key, format_timestamp(entry.recorded_at));
    println!("id: {}", entry.id);
    println!();
    match &entry.value {
        Value::String(text) => println!("{}", text),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

/// One-line preview of a stored result
fn summarize(value: &Value) -> String {
    let headline = match value {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => ["definition", "translated", "reference"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .or_else(|| {
                map.get("result")
                    .and_then(|result| result.get("translated"))
                    .and_then(Value::as_str)
            }),
        _ => None,
    };

    match headline {
        Some(text) => truncate(text, 60),
        None => truncate(&value.to_string(), 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_plain_text() {
        assert_eq!(summarize(&json!("Favor imerecido")), "Favor imerecido");
    }

    #[test]
    fn test_summarize_word_definition() {
        let value = json!({"definition": "Ato de perdoar", "class": "substantivo"});
        assert_eq!(summarize(&value), "Ato de perdoar");
    }

    #[test]
    fn test_summarize_translation() {
        let value = json!({"direction": "pt-gr", "result": {"translated": "ἀγάπη"}});
        assert_eq!(summarize(&value), "ἀγάπη");
    }

    #[test]
    fn test_summarize_commentary_uses_reference() {
        let value = json!({"reference": "Salmo 23", "historicalContext": "..."});
        assert_eq!(summarize(&value), "Salmo 23");
    }

    #[test]
    fn test_summarize_falls_back_to_json() {
        assert_eq!(summarize(&json!([1, 2])), "[1,2]");
    }
}
