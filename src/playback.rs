//! Playback state and the player contract.
//!
//! [`PlaybackController`] is the only owner of the `Idle`/`Playing` state. It
//! forwards start and stop requests to a [`Player`], which does the actual
//! audio work and reports nothing back.

mod controller;

use std::path::Path;

pub use controller::{PlaybackController, PlaybackState};

/// Something that can make a file audible. Both calls are fire-and-forget.
pub trait Player {
    fn start(&mut self, filename: &Path);
    fn stop(&mut self);
}
