//! Error types shared by the library, playback and audio layers.

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable errors reported by library and playback operations.
///
/// Neither variant is fatal: the operation is aborted and the caller decides
/// how to surface it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// The index does not address a track (`index >= len`).
    #[error("index {index} is out of range for a library of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// `play` was requested while something is already playing.
    #[error("a playback is already in progress, stop it first")]
    PlaybackInProgress,
}

/// Failures inside the audio backend. These never leave the audio thread.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
