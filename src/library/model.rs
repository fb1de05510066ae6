use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Artist and title used when only the file name of a track is known.
pub const UNKNOWN: &str = "unknown";

/// A single audio file and the metadata the library keeps about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub filename: PathBuf,
    pub album: String,
    pub play_count: u32,
    /// Length reported by the file's audio properties, when the loader could read it.
    pub duration: Option<Duration>,
}

impl Track {
    /// Create a track with full metadata, no album and a zero play count.
    pub fn new(artist: impl Into<String>, title: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            filename: filename.into(),
            album: String::new(),
            play_count: 0,
            duration: None,
        }
    }

    /// Create a track whose artist and title cannot be decoded from the file.
    pub fn from_filename(filename: impl Into<PathBuf>) -> Self {
        Self::new(UNKNOWN, UNKNOWN, filename)
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn set_album(&mut self, album: impl Into<String>) {
        self.album = album.into();
    }

    pub fn increment_play_count(&mut self) {
        self.play_count = self.play_count.saturating_add(1);
    }

    pub fn reset_play_count(&mut self) {
        self.play_count = 0;
    }

    /// One-line description: artist, title, file, play count and album.
    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}  (file: {}) - plays: {}. album: {}",
            self.artist,
            self.title,
            self.filename.display(),
            self.play_count,
            self.album
        )
    }
}
