//! Parser for the `:` command line.
//!
//! Commands that take an index fall back to the selected track when the
//! index is omitted.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Option<usize>),
    PlayFirst,
    Stop,
    Remove(Option<usize>),
    ResetPlays(Option<usize>),
    RemoveArtist(String),
    RemoveTitle(String),
    Album { index: Option<usize>, album: String },
    FilterArtist(String),
    FilterTitle(String),
    ClearFilter,
    List(ListScope),
    Add(PathBuf),
    Status,
    Config,
    Quit,
}

/// Which tracks `list` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    All,
    Artist(String),
    Title(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("not a track number: {0}")]
    BadIndex(String),
}

fn index_arg(rest: &str) -> Result<Option<usize>, ParseError> {
    if rest.is_empty() {
        return Ok(None);
    }
    rest.parse::<usize>()
        .map(Some)
        .map_err(|_| ParseError::BadIndex(rest.to_string()))
}

fn text_arg(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(rest.to_string())
    }
}

/// `album N NAME` or `album NAME`. A lone number is an album name.
fn album_args(rest: &str) -> Result<Command, ParseError> {
    let usage = "album [N] NAME";
    if rest.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    if let Some((first, tail)) = rest.split_once(char::is_whitespace) {
        if let Ok(index) = first.parse::<usize>() {
            let album = tail.trim();
            if !album.is_empty() {
                return Ok(Command::Album {
                    index: Some(index),
                    album: album.to_string(),
                });
            }
        }
    }
    Ok(Command::Album {
        index: None,
        album: rest.to_string(),
    })
}

fn list_args(rest: &str) -> Result<ListScope, ParseError> {
    let usage = "list [artist TEXT | title TEXT]";
    if rest.is_empty() {
        return Ok(ListScope::All);
    }
    match rest.split_once(char::is_whitespace) {
        Some(("artist", text)) if !text.trim().is_empty() => Ok(ListScope::Artist(text.trim().to_string())),
        Some(("title", text)) if !text.trim().is_empty() => Ok(ListScope::Title(text.trim().to_string())),
        _ => Err(ParseError::Usage(usage)),
    }
}

/// Parse one command line. A leading `:` is accepted and ignored.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let line = line.strip_prefix(':').unwrap_or(line).trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "play" | "p" => Ok(Command::Play(index_arg(rest)?)),
        "first" => Ok(Command::PlayFirst),
        "stop" | "s" => Ok(Command::Stop),
        "rm" | "remove" => Ok(Command::Remove(index_arg(rest)?)),
        "reset" => Ok(Command::ResetPlays(index_arg(rest)?)),
        "rm-artist" => Ok(Command::RemoveArtist(text_arg(rest, "rm-artist TEXT")?)),
        "rm-title" => Ok(Command::RemoveTitle(text_arg(rest, "rm-title TEXT")?)),
        "album" => album_args(rest),
        "artist" => Ok(Command::FilterArtist(text_arg(rest, "artist TEXT")?)),
        "title" => Ok(Command::FilterTitle(text_arg(rest, "title TEXT")?)),
        "clear" => Ok(Command::ClearFilter),
        "list" | "ls" => Ok(Command::List(list_args(rest)?)),
        "add" => Ok(Command::Add(PathBuf::from(text_arg(rest, "add FILE")?))),
        "status" => Ok(Command::Status),
        "config" => Ok(Command::Config),
        "q" | "quit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}
