use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Source of the tracks the library starts with.
pub trait LibraryLoader {
    /// Return every track under `folder` whose extension is one of `extensions`.
    fn load_tracks(&self, folder: &Path, extensions: &[String]) -> Vec<Track>;
}

/// Loads tracks from a directory tree, reading tags when the file has them.
#[derive(Debug, Clone)]
pub struct FolderLoader {
    pub follow_links: bool,
    pub include_hidden: bool,
    pub recursive: bool,
    pub max_depth: Option<usize>,
}

impl Default for FolderLoader {
    fn default() -> Self {
        Self::from_settings(&LibrarySettings::default())
    }
}

impl FolderLoader {
    pub fn from_settings(settings: &LibrarySettings) -> Self {
        Self {
            follow_links: settings.follow_links,
            include_hidden: settings.include_hidden,
            recursive: settings.recursive,
            max_depth: settings.max_depth,
        }
    }
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Split a file stem of the form `Artist - Title` (or `Artist-Title`).
fn split_stem(stem: &str) -> Option<(String, String)> {
    let (artist, title) = stem.split_once('-')?;
    let (artist, title) = (artist.trim(), title.trim());
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build a track for `path`, preferring tags, then the file stem.
fn read_track(path: &Path) -> Track {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration: Option<Duration> = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                title = non_empty(tag.title());
                artist = non_empty(tag.artist());
                album = non_empty(tag.album());
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

    let track = match (artist, title) {
        (Some(a), Some(t)) => Track::new(a, t, path),
        (artist, title) => match split_stem(stem) {
            Some((a, t)) => Track::new(artist.unwrap_or(a), title.unwrap_or(t), path),
            None => {
                let mut track = Track::from_filename(path);
                if let Some(a) = artist {
                    track.artist = a;
                }
                if let Some(t) = title {
                    track.title = t;
                }
                track
            }
        },
    };

    track
        .with_album(album.unwrap_or_default())
        .with_duration(duration)
}

impl LibraryLoader for FolderLoader {
    fn load_tracks(&self, folder: &Path, extensions: &[String]) -> Vec<Track> {
        let exts = normalize_extensions(extensions);
        let mut walker = WalkDir::new(folder).follow_links(self.follow_links);

        // Non-recursive = only the root directory.
        let depth_cap = if self.recursive { self.max_depth } else { Some(1) };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let mut tracks: Vec<Track> = walker
            .into_iter()
            .filter_entry(|e| self.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .filter(|e| has_extension(e.path(), &exts))
            .map(|e| read_track(e.path()))
            .collect();

        tracks.sort_by(|a, b| a.filename.cmp(&b.filename));
        tracks
    }
}
