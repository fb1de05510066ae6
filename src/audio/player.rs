use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::playback::Player;

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// A [`Player`] backed by `rodio` on a dedicated thread.
///
/// Commands are queued and never waited on; failures are logged by the
/// audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(rx, audio_settings);

        Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    fn send_or_log(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone, command dropped");
        }
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Player for AudioPlayer {
    fn start(&mut self, filename: &Path) {
        self.send_or_log(AudioCmd::Start(filename.to_path_buf()));
    }

    fn stop(&mut self) {
        self.send_or_log(AudioCmd::Stop);
    }
}
