//! Audio backend.
//!
//! Playback runs on its own thread that owns the `rodio` output stream and
//! the current sink. [`AudioPlayer`] is the handle the rest of the program
//! talks to.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
