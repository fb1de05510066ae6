use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread;
use std::thread::JoinHandle;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::error::AudioError;

use super::sink::{fade_levels, open_sink};
use super::types::AudioCmd;

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, audio_settings: AudioSettings) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %AudioError::from(e), "audio output unavailable, playback is silent");
                // Keep the channel alive so callers never see a closed player.
                while let Ok(cmd) = rx.recv() {
                    if matches!(cmd, AudioCmd::Quit { .. }) {
                        break;
                    }
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let volume = audio_settings.volume.clamp(0.0, 1.0);
        let mut sink: Option<Sink> = None;

        while let Ok(cmd) = rx.recv() {
            match cmd {
                AudioCmd::Start(path) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    sink = start(&stream, &path, volume);
                }
                AudioCmd::Stop => {
                    if let Some(s) = sink.take() {
                        s.stop();
                        debug!("sink stopped");
                    }
                }
                AudioCmd::Quit { fade_out_ms } => {
                    if let Some(s) = sink.take() {
                        // Fade out gently before stopping.
                        fade_out_sink(&s, volume, fade_out_ms);
                        s.stop();
                    }
                    break;
                }
            }
        }
        debug!("audio thread finished");
    })
}

fn start(stream: &OutputStream, path: &Path, volume: f32) -> Option<Sink> {
    match open_sink(stream, path) {
        Ok(s) => {
            s.set_volume(volume);
            s.play();
            debug!(path = %path.display(), "sink started");
            Some(s)
        }
        Err(e) => {
            warn!(error = %e, "could not start playback");
            None
        }
    }
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    let (levels, step) = fade_levels(volume, fade_out_ms);
    for level in levels {
        sink.set_volume(level);
        thread::sleep(step);
    }
    sink.set_volume(0.0);
}
