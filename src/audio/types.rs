//! Commands understood by the audio thread.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Stop whatever is playing and start the given file.
    Start(PathBuf),
    /// Stop playback immediately.
    Stop,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
