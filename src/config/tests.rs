use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use super::load::{CONFIG_PATH_VAR, default_config_path, default_log_path, resolve_config_path};
use super::schema::*;

/// Serializes tests that touch the process environment and restores every
/// variable it changed when dropped.
struct EnvScope {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    /// `Some(v)` sets the variable, `None` unsets it.
    fn new(vars: &[(&'static str, Option<&str>)]) -> Self {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let lock = LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let saved = vars
            .iter()
            .map(|&(key, value)| {
                let old = std::env::var_os(key);
                unsafe {
                    match value {
                        Some(v) => std::env::set_var(key, v),
                        None => std::env::remove_var(key),
                    }
                }
                (key, old)
            })
            .collect();
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, old) in self.saved.drain(..).rev() {
            unsafe {
                match old {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn explicit_config_path_wins_over_xdg() {
    let _env = EnvScope::new(&[
        (CONFIG_PATH_VAR, Some("/tmp/organizer-test-config.toml")),
        ("XDG_CONFIG_HOME", Some("/tmp/xdg-config-home")),
    ]);
    assert_eq!(
        resolve_config_path(),
        Some(PathBuf::from("/tmp/organizer-test-config.toml"))
    );
}

#[test]
fn config_path_uses_xdg_then_home() {
    {
        let _env = EnvScope::new(&[
            (CONFIG_PATH_VAR, None),
            ("XDG_CONFIG_HOME", Some("/tmp/xdg-config-home")),
            ("HOME", Some("/tmp/home-should-not-win")),
        ]);
        assert_eq!(
            resolve_config_path(),
            Some(PathBuf::from("/tmp/xdg-config-home/organizer/config.toml"))
        );
    }

    let _env = EnvScope::new(&[("XDG_CONFIG_HOME", None), ("HOME", Some("/tmp/home-dir"))]);
    assert_eq!(
        default_config_path(),
        Some(PathBuf::from("/tmp/home-dir/.config/organizer/config.toml"))
    );
}

#[test]
fn log_path_uses_xdg_state_then_home() {
    {
        let _env = EnvScope::new(&[("XDG_STATE_HOME", Some("/tmp/xdg-state"))]);
        assert_eq!(
            default_log_path(),
            Some(PathBuf::from("/tmp/xdg-state/organizer/organizer.log"))
        );
    }

    let _env = EnvScope::new(&[("XDG_STATE_HOME", None), ("HOME", Some("/tmp/home-dir"))]);
    assert_eq!(
        default_log_path(),
        Some(PathBuf::from("/tmp/home-dir/.local/state/organizer/organizer.log"))
    );
}

#[test]
fn no_home_and_no_xdg_means_no_default_paths() {
    let _env = EnvScope::new(&[
        ("XDG_CONFIG_HOME", None),
        ("XDG_STATE_HOME", None),
        ("HOME", None),
    ]);
    assert_eq!(default_config_path(), None);
    assert_eq!(default_log_path(), None);
}

#[test]
fn settings_load_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = write_config(
        &dir,
        r#"
[library]
folder = "/srv/music"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 2
row_fields = ["title", "play-count", "album"]
row_separator = " | "

[audio]
quit_fade_out_ms = 0
volume = 0.5

[ui]
header_text = "hello"
show_details = true

[log]
level = "organizer=debug"
file = "/tmp/organizer.log"
"#,
    );
    let _env = EnvScope::new(&[
        (CONFIG_PATH_VAR, cfg_path.to_str()),
        ("ORGANIZER__AUDIO__VOLUME", None),
    ]);

    let s = Settings::load().unwrap();
    assert_eq!(s.library.folder, PathBuf::from("/srv/music"));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(2));
    assert_eq!(
        s.library.row_fields,
        vec![TrackField::Title, TrackField::Plays, TrackField::Album]
    );
    assert_eq!(s.library.row_separator, " | ");
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.ui.show_details);
    assert_eq!(s.log.level, "organizer=debug");
    assert_eq!(s.log.file, Some(PathBuf::from("/tmp/organizer.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn env_overrides_beat_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = write_config(&dir, "[audio]\nquit_fade_out_ms = 250\nvolume = 0.8\n");
    let _env = EnvScope::new(&[
        (CONFIG_PATH_VAR, cfg_path.to_str()),
        ("ORGANIZER__AUDIO__QUIT_FADE_OUT_MS", Some("0")),
        ("ORGANIZER__LIBRARY__EXTENSIONS", Some("ogg,opus")),
        ("ORGANIZER__AUDIO__VOLUME", None),
    ]);

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.audio.volume, 0.8);
    assert_eq!(s.library.extensions, vec!["ogg".to_string(), "opus".to_string()]);
}

#[test]
fn settings_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let _env = EnvScope::new(&[(CONFIG_PATH_VAR, missing.to_str())]);

    let s = Settings::load().unwrap();
    assert_eq!(s.library.folder, PathBuf::from("audio"));
    assert_eq!(s.library.extensions.len(), 4);
    assert_eq!(s.audio.volume, 1.0);
    assert_eq!(s.log.level, "info");
}

#[test]
fn validate_rejects_bad_volume_and_empty_extensions() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.volume = 1.5;
    assert!(s.validate().unwrap_err().contains("audio.volume"));

    s.audio.volume = 0.2;
    s.library.extensions = vec![".".to_string(), " ".to_string()];
    assert!(s.validate().unwrap_err().contains("library.extensions"));
}

#[test]
fn to_toml_renders_sections() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("[library]"));
    assert!(text.contains("folder = \"audio\""));
    assert!(text.contains("row_fields = [\"artist\", \"title\"]") || text.contains("\"artist\","));
    assert!(text.contains("[audio]"));
}
