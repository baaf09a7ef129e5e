//! Command-line surface and dispatch.
//!
//! ```text
//! jot <text>       add a note
//! jot ls           list all notes
//! jot peek <id>    view a note
//! jot rm <id>      delete a note
//! jot pop          view + delete the latest note
//! ```

use crate::client::NoteClient;
use crate::config::Config;
use crate::display;
use crate::error::JotError;
use crate::transport::Transport;
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;

/// jot - quick sticky notes
///
/// Only used to render usage text. Dispatch happens on the first argument in
/// `parse_args`, since every word that is not a command starts a note.
#[derive(Parser, Debug)]
#[command(name = "jot", about = "quick sticky notes", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Anything else is saved as a new note:\n  jot call the dentist tomorrow")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List all notes, newest first
    Ls,

    /// View a note
    Peek { id: String },

    /// Delete a note
    Rm { id: String },

    /// View + delete the latest note
    Pop,

    /// Add a note; every word of the invocation becomes the body
    #[command(external_subcommand)]
    Add(Vec<String>),
}

/// What the process should do after argument parsing
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Print this text and exit successfully
    Help(String),
    Run(Command),
}

/// Parse `argv` (program name first). Trailing words after `ls`, `pop` or an
/// id are ignored.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, JotError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let words: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|a| a.into().to_string_lossy().into_owned())
        .collect();

    let Some(first) = words.first().cloned() else {
        return Ok(Invocation::Help(usage()));
    };

    let command = match first.as_str() {
        "-h" | "--help" | "help" => return Ok(Invocation::Help(usage())),
        "ls" => Command::Ls,
        "pop" => Command::Pop,
        "peek" => Command::Peek {
            id: required_id(&words, "peek")?,
        },
        "rm" => Command::Rm {
            id: required_id(&words, "rm")?,
        },
        _ => Command::Add(words),
    };

    Ok(Invocation::Run(command))
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

fn required_id(words: &[String], command: &str) -> Result<String, JotError> {
    words
        .get(1)
        .cloned()
        .ok_or_else(|| JotError::Usage(format!("usage: jot {} <id>", command)))
}

/// A validated command, ready to talk to the database
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Add(String),
    List,
    Peek(i64),
    Remove(i64),
    Pop,
}

impl TryFrom<Command> for Action {
    type Error = JotError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::Ls => Action::List,
            Command::Peek { id } => Action::Peek(parse_note_id(&id)?),
            Command::Rm { id } => Action::Remove(parse_note_id(&id)?),
            Command::Pop => Action::Pop,
            Command::Add(words) => Action::Add(note_body(&words)?),
        })
    }
}

fn note_body(words: &[String]) -> Result<String, JotError> {
    let body = words.join(" ");
    if body.trim().is_empty() {
        return Err(JotError::Usage("note body is empty".to_string()));
    }
    Ok(body)
}

fn parse_note_id(raw: &str) -> Result<i64, JotError> {
    raw.parse()
        .map_err(|_| JotError::Usage(format!("invalid note id: {}", raw)))
}

/// Validate the command, load config, make sure the table exists, then run
/// the command. Nothing touches the network until arguments and config are
/// known to be good.
pub async fn run<T, C, M, W>(
    command: Command,
    load_config: C,
    make_transport: M,
    out: &mut W,
) -> Result<(), JotError>
where
    T: Transport,
    C: FnOnce() -> Result<Config, JotError>,
    M: FnOnce(&Config) -> Result<T, JotError>,
    W: Write,
{
    let action = Action::try_from(command)?;
    let config = load_config()?;
    let client = NoteClient::new(&config, make_transport(&config)?);

    client.init_schema().await?;

    let now = Utc::now();
    match action {
        Action::Add(body) => {
            let id = client.add(&body).await?;
            writeln!(out, "noted (#{})", id)?;
        }
        Action::List => {
            let notes = client.list().await?;
            write!(out, "{}", display::render_list(&notes, now))?;
        }
        Action::Peek(id) => {
            let note = client.get_by_id(id).await?;
            write!(out, "{}", display::render_note(&note, now))?;
        }
        Action::Remove(id) => {
            client.delete(id).await?;
            writeln!(out, "removed #{}", id)?;
        }
        Action::Pop => {
            let note = client.get_latest().await?;
            write!(out, "{}", display::render_note(&note, now))?;
            writeln!(out)?;
            client.delete(note.id).await?;
            writeln!(out, "{}", display::dim("(removed)"))?;
        }
    }

    Ok(())
}
