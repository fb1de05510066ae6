//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helpers here encapsulate opening/decoding a file into a paused `Sink`
//! and computing the volume ramp used when fading out.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::AudioError;

const FADE_STEPS: u64 = 20;

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn open_sink(stream: &OutputStream, path: &Path) -> Result<Sink, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Volume levels for a fade from `from` down to silence over `fade_out_ms`,
/// and the pause between two levels. Empty when no fade is wanted.
pub(super) fn fade_levels(from: f32, fade_out_ms: u64) -> (Vec<f32>, Duration) {
    if fade_out_ms == 0 || from <= 0.0 {
        return (Vec::new(), Duration::ZERO);
    }
    let step = Duration::from_millis((fade_out_ms / FADE_STEPS).max(1));
    let levels = (1..=FADE_STEPS)
        .map(|i| from * (1.0 - i as f32 / FADE_STEPS as f32))
        .collect();
    (levels, step)
}
