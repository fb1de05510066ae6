//! The music organizer: one track store plus one playback controller.
//!
//! All operations address tracks by position and run synchronously. Errors
//! are [`LibraryError`](crate::error::LibraryError)s; none of them leave the organizer in a changed state.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::library::{LibraryLoader, Track, TrackStore};
use crate::playback::{PlaybackController, PlaybackState, Player};

#[derive(Debug)]
pub struct Organizer<P> {
    store: TrackStore,
    playback: PlaybackController<P>,
}

impl<P: Player> Organizer<P> {
    pub fn new(player: P) -> Self {
        Self::with_tracks(player, Vec::new())
    }

    pub fn with_tracks(player: P, tracks: Vec<Track>) -> Self {
        Self {
            store: TrackStore::from_tracks(tracks),
            playback: PlaybackController::new(player),
        }
    }

    /// Append everything `loader` finds under `folder`. Returns how many
    /// tracks were added.
    pub fn load<L: LibraryLoader + ?Sized>(&mut self, loader: &L, folder: &Path, extensions: &[String]) -> usize {
        let tracks = loader.load_tracks(folder, extensions);
        let n = tracks.len();
        for track in tracks {
            self.add_track(track);
        }
        info!(folder = %folder.display(), count = n, total = self.store.count(), "music library loaded");
        n
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn player(&self) -> &P {
        self.playback.player()
    }

    /// Add a track for a file whose artist and title are unknown.
    pub fn add_file(&mut self, filename: impl Into<PathBuf>) {
        self.store.add(Track::from_filename(filename));
    }

    pub fn add_track(&mut self, track: Track) {
        self.store.add(track);
    }

    pub fn number_of_tracks(&self) -> usize {
        self.store.count()
    }

    pub fn track(&self, index: usize) -> Result<&Track> {
        self.store.get(index)
    }

    /// Play the track at `index`.
    ///
    /// A running playback is reported before the index is looked at.
    pub fn play_track(&mut self, index: usize) -> Result<()> {
        self.playback.ensure_idle()?;
        let track = self.store.get_mut(index)?;
        self.playback.play(track)
    }

    /// Play the first track if there is one. Returns whether playback started.
    pub fn play_first(&mut self) -> Result<bool> {
        self.playback.ensure_idle()?;
        if self.store.is_empty() {
            debug!("play first: library is empty");
            return Ok(false);
        }
        self.play_track(0)?;
        Ok(true)
    }

    pub fn stop_playing(&mut self) {
        self.playback.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn set_track_album(&mut self, index: usize, album: impl Into<String>) -> Result<()> {
        self.store.set_album(index, album)
    }

    pub fn reset_play_count(&mut self, index: usize) -> Result<()> {
        self.store.get_mut(index)?.reset_play_count();
        debug!(index, "play count reset");
        Ok(())
    }

    pub fn remove_track(&mut self, index: usize) -> Result<Track> {
        self.store.remove_at(index)
    }

    pub fn remove_by_artist(&mut self, artist: &str) -> usize {
        self.store.remove_by_artist(artist)
    }

    pub fn remove_by_title(&mut self, title: &str) -> usize {
        self.store.remove_by_title(title)
    }

    pub fn list_all_tracks(&self) -> Vec<String> {
        self.store.list_all()
    }

    pub fn list_by_artist(&self, artist: &str) -> Vec<String> {
        self.store
            .find_by_artist(artist)
            .into_iter()
            .map(|(_, t)| t.details())
            .collect()
    }

    pub fn find_in_title(&self, title: &str) -> Vec<String> {
        self.store
            .find_by_title(title)
            .into_iter()
            .map(|(_, t)| t.details())
            .collect()
    }

    /// Details line for the track at `index`, prefixed with its position.
    pub fn list_track(&self, index: usize) -> Result<String> {
        let track = self.store.get(index)?;
        Ok(format!("Track {index}: {}", track.details()))
    }
}

#[cfg(test)]
mod tests;
