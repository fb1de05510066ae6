use tracing::info;

use crate::error::{LibraryError, Result};
use crate::library::Track;

use super::Player;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Gates start requests on the current state and forwards them to `P`.
#[derive(Debug)]
pub struct PlaybackController<P> {
    player: P,
    state: PlaybackState,
}

impl<P: Player> PlaybackController<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Fail with [`LibraryError::PlaybackInProgress`] unless idle.
    pub fn ensure_idle(&self) -> Result<()> {
        match self.state {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Playing => Err(LibraryError::PlaybackInProgress),
        }
    }

    /// Start `track`: bump its play count, hand its file to the player and
    /// switch to `Playing`. Nothing changes when already playing.
    pub fn play(&mut self, track: &mut Track) -> Result<()> {
        self.ensure_idle()?;
        track.increment_play_count();
        self.player.start(track.filename());
        self.state = PlaybackState::Playing;
        info!(artist = %track.artist, title = %track.title, plays = track.play_count, "now playing");
        Ok(())
    }

    /// Stop the player and go back to `Idle`, whatever the previous state.
    pub fn stop(&mut self) {
        self.player.stop();
        if self.state == PlaybackState::Playing {
            info!("playback stopped");
        }
        self.state = PlaybackState::Idle;
    }
}
