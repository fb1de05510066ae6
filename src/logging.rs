//! Log setup. The terminal belongs to the UI, so events go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `settings.level`. Returns the log file in use, or
/// `None` when no file could be opened (logging is then disabled).
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(default_log_path)?;

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return None;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    Some(path)
}
