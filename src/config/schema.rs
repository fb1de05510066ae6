use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/organizer/config.toml` or `~/.config/organizer/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ORGANIZER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder scanned at startup. The first command-line argument overrides it.
    pub folder: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields make up a row in the track list, and in what order.
    ///
    /// Example: ["artist", "title", "plays"]
    pub row_fields: Vec<TrackField>,
    /// Separator used to join `row_fields`.
    pub row_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("audio"),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            row_fields: vec![TrackField::Artist, TrackField::Title],
            row_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackField {
    Artist,
    Title,
    Album,
    Filename,
    Path,
    #[serde(alias = "play-count", alias = "play_count")]
    Plays,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Output volume, from 0.0 (silent) to 1.0.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Render every list row as the full details line instead of `library.row_fields`.
    pub show_details: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ your music, in order ~ ".to_string(),
            show_details: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/organizer/organizer.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
