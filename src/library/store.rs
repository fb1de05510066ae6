//! The ordered, in-memory track collection.
//!
//! Tracks are identified by their position. Every indexed operation checks
//! bounds first and reports [`LibraryError::IndexOutOfRange`] without
//! touching the collection when the index is invalid.

use tracing::debug;

use crate::error::{LibraryError, Result};

use super::model::Track;

#[derive(Debug, Default, Clone)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Append `track` at the end. Duplicates are allowed.
    pub fn add(&mut self, track: Track) {
        debug!(artist = %track.artist, title = %track.title, "adding track");
        self.tracks.push(track);
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(LibraryError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&Track> {
        self.check_index(index)?;
        Ok(&self.tracks[index])
    }

    /// Mutable access to a single track, bounds-checked like [`TrackStore::get`].
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Track> {
        self.check_index(index)?;
        Ok(&mut self.tracks[index])
    }

    /// Remove and return the track at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Track> {
        self.check_index(index)?;
        let track = self.tracks.remove(index);
        debug!(index, artist = %track.artist, title = %track.title, "removed track");
        Ok(track)
    }

    /// Remove every track matching `predicate`, keeping survivors in order.
    ///
    /// Returns how many tracks were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Track) -> bool,
    {
        let (removed, survivors): (Vec<Track>, Vec<Track>) = std::mem::take(&mut self.tracks)
            .into_iter()
            .partition(|t| predicate(t));
        self.tracks = survivors;
        removed.len()
    }

    /// Remove tracks whose artist contains `artist` (case-sensitive).
    pub fn remove_by_artist(&mut self, artist: &str) -> usize {
        let n = self.remove_where(|t| artist_matches(t, artist));
        debug!(artist, removed = n, "removed tracks by artist");
        n
    }

    /// Remove tracks whose title contains `title`, ignoring case.
    pub fn remove_by_title(&mut self, title: &str) -> usize {
        let needle = title.to_lowercase();
        let n = self.remove_where(|t| title_matches_lower(t, &needle));
        debug!(title, removed = n, "removed tracks by title");
        n
    }

    /// Details line of every track, in store order.
    pub fn list_all(&self) -> Vec<String> {
        self.tracks.iter().map(Track::details).collect()
    }

    /// Tracks whose artist contains `artist`. The match is case-sensitive.
    pub fn find_by_artist(&self, artist: &str) -> Vec<(usize, &Track)> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| artist_matches(t, artist))
            .collect()
    }

    /// Tracks whose title contains `title`. Unlike [`TrackStore::find_by_artist`]
    /// the match ignores case.
    pub fn find_by_title(&self, title: &str) -> Vec<(usize, &Track)> {
        let needle = title.to_lowercase();
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| title_matches_lower(t, &needle))
            .collect()
    }

    pub fn set_album(&mut self, index: usize, album: impl Into<String>) -> Result<()> {
        let track = self.get_mut(index)?;
        track.set_album(album);
        debug!(index, album = %track.album, "album updated");
        Ok(())
    }
}

fn artist_matches(track: &Track, artist: &str) -> bool {
    track.artist.contains(artist)
}

fn title_matches_lower(track: &Track, needle_lower: &str) -> bool {
    track.title.to_lowercase().contains(needle_lower)
}
