//! Command-line access to mod notes.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use modnotes_rs::config::{LayeredConfigOptions, ModNotesConfig};
use modnotes_rs::core::ListingOptions;
use modnotes_rs::{
    DeleteNotes, ModNote, NewNote, NoteLabel, NoteType, QueryOptions, RedditClient,
};
use std::path::PathBuf;

/// Environment variable consulted for a bearer token.
const ACCESS_TOKEN_ENV: &str = "MODNOTES_ACCESS_TOKEN";

/// Command-line options for the mod notes client.
#[derive(Parser)]
#[command(name = "modnotes", version)]
struct Cli {
    /// Optional path to a modnotes.json5 override file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Subreddit to act in, overriding the configured one
    #[arg(long, short)]
    subreddit: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every note on a redditor
    List {
        redditor: String,
        /// Maximum notes to print
        #[arg(long)]
        limit: Option<usize>,
        /// Only notes of this type, e.g. NOTE or BAN
        #[arg(long, value_parser = parse_note_type)]
        filter: Option<NoteType>,
    },
    /// Print the latest note for each redditor
    Latest {
        #[arg(required = true)]
        redditors: Vec<String>,
    },
    /// Add a note to a redditor
    Add {
        redditor: String,
        note: String,
        /// Label such as SPAM_WARNING
        #[arg(long, value_parser = parse_label)]
        label: Option<NoteLabel>,
        /// Fullname of the comment or submission the note refers to
        #[arg(long)]
        thing: Option<String>,
    },
    /// Delete one note, or all notes with --all
    Delete {
        redditor: String,
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        note_id: Option<String>,
        #[arg(long)]
        all: bool,
    },
}

fn main() -> anyhow::Result<()> {
    modnotes_rs::init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = RedditClient::from_config(&config).context("failed to build client")?;
    let notes = client.mod_notes();

    match cli.command {
        Command::List {
            redditor,
            limit,
            filter,
        } => {
            let mut listing = ListingOptions::new();
            if let Some(limit) = limit {
                listing = listing.limit(limit);
            }
            listing.filter = filter;
            let options = QueryOptions::new().all_notes(true).listing(listing);
            for note in notes.query(redditor.as_str(), options)?.notes() {
                print_note(&note?)?;
            }
        }
        Command::Latest { redditors } => {
            let results = notes.redditors(redditors.iter().map(String::as_str), QueryOptions::new())?;
            for (redditor, entry) in redditors.iter().zip(results) {
                match entry? {
                    Some(note) => print_note(&note)?,
                    None => println!("{redditor}: no notes"),
                }
            }
        }
        Command::Add {
            redditor,
            note,
            label,
            thing,
        } => {
            let mut new = NewNote::new(note).redditor(redditor);
            new.label = label;
            if let Some(thing) = thing {
                new = new.thing(thing);
            }
            print_note(&notes.create(new)?)?;
        }
        Command::Delete {
            redditor,
            note_id,
            all,
        } => {
            let request = match (note_id, all) {
                (_, true) => DeleteNotes::all(redditor),
                (Some(note_id), false) => DeleteNotes::note(redditor, note_id),
                (None, false) => bail!("either --note-id or --all is required"),
            };
            let deleted = notes.delete(request)?;
            info!("delete finished (deleted={})", deleted);
            println!("deleted {deleted} note(s)");
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ModNotesConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = &cli.config {
        options = options.with_runtime_path(path);
    }
    let layered = ModNotesConfig::load_layered_with_options(options)
        .context("failed to load configuration")?;
    debug!("config layers loaded (count={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(subreddit) = &cli.subreddit {
        config.notes.subreddit = Some(subreddit.clone());
    }
    if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
        config.api.access_token = Some(token);
    }
    Ok(config)
}

fn print_note(note: &ModNote) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(note.record())?);
    Ok(())
}

fn parse_label(value: &str) -> Result<NoteLabel, String> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_uppercase()))
        .map_err(|_| format!("unknown label: {value}"))
}

fn parse_note_type(value: &str) -> Result<NoteType, String> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_uppercase()))
        .map_err(|_| format!("unknown note type: {value}"))
}
