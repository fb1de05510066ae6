use crate::config::TrackField;

use super::model::{Track, UNKNOWN};

/// Build a list row for `track` from the configured `fields` and separator.
///
/// Empty fields and the `unknown` placeholder are skipped so a track loaded
/// from a bare file name still renders as its file stem. Falls back to the
/// full details line when nothing was produced.
pub fn row_from_fields(track: &Track, fields: &[TrackField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    let known = |s: &str| {
        let s = s.trim();
        (!s.is_empty() && s != UNKNOWN).then(|| s.to_string())
    };

    for f in fields {
        match f {
            TrackField::Artist => parts.extend(known(&track.artist)),
            TrackField::Title => parts.extend(known(&track.title)),
            TrackField::Album => parts.extend(known(&track.album)),
            TrackField::Filename => {
                if let Some(stem) = track.filename.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackField::Path => parts.push(track.filename.display().to_string()),
            TrackField::Plays => parts.push(format!("{} plays", track.play_count)),
        }
    }

    if parts.is_empty() {
        track
            .filename
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| track.details())
    } else {
        parts.join(sep)
    }
}
