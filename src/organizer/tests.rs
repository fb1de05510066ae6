use std::path::{Path, PathBuf};

use super::*;
use crate::error::LibraryError;
use crate::playback::tests::{PlayerCall, RecordingPlayer};

fn organizer() -> Organizer<RecordingPlayer> {
    Organizer::with_tracks(
        RecordingPlayer::default(),
        vec![Track::new("A", "T1", "f1"), Track::new("B", "T2", "f2")],
    )
}

struct FixedLoader(Vec<Track>);

impl LibraryLoader for FixedLoader {
    fn load_tracks(&self, _folder: &Path, _extensions: &[String]) -> Vec<Track> {
        self.0.clone()
    }
}

#[test]
fn play_stop_scenario() {
    let mut o = organizer();

    o.play_track(0).unwrap();
    assert!(o.is_playing());
    assert_eq!(o.track(0).unwrap().play_count, 1);

    assert_eq!(o.play_track(1), Err(LibraryError::PlaybackInProgress));
    assert_eq!(o.track(1).unwrap().play_count, 0);

    o.stop_playing();
    assert_eq!(o.playback_state(), PlaybackState::Idle);
    o.stop_playing();
    assert_eq!(o.playback_state(), PlaybackState::Idle);

    assert_eq!(
        o.player().calls,
        vec![
            PlayerCall::Start(PathBuf::from("f1")),
            PlayerCall::Stop,
            PlayerCall::Stop
        ]
    );
}

#[test]
fn busy_player_is_reported_before_bad_index() {
    let mut o = organizer();
    o.play_track(1).unwrap();
    assert_eq!(o.play_track(42), Err(LibraryError::PlaybackInProgress));
}

#[test]
fn play_track_with_bad_index_keeps_idle() {
    let mut o = organizer();
    assert_eq!(
        o.play_track(2),
        Err(LibraryError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert!(!o.is_playing());
    assert!(o.player().calls.is_empty());
}

#[test]
fn play_first_handles_empty_and_busy() {
    let mut empty = Organizer::new(RecordingPlayer::default());
    assert_eq!(empty.play_first(), Ok(false));
    assert!(!empty.is_playing());

    let mut o = organizer();
    assert_eq!(o.play_first(), Ok(true));
    assert_eq!(o.track(0).unwrap().play_count, 1);
    assert_eq!(o.play_first(), Err(LibraryError::PlaybackInProgress));
    assert_eq!(o.track(0).unwrap().play_count, 1);
}

#[test]
fn album_and_removal_go_through_the_store() {
    let mut o = organizer();
    o.set_track_album(0, "Greatest Hits").unwrap();
    assert_eq!(o.track(0).unwrap().album, "Greatest Hits");
    assert!(o.set_track_album(99, "X").is_err());

    o.play_track(1).unwrap();
    o.stop_playing();
    assert_eq!(o.track(1).unwrap().play_count, 1);
    o.reset_play_count(1).unwrap();
    assert_eq!(o.track(1).unwrap().play_count, 0);
    assert!(o.reset_play_count(2).is_err());

    assert!(o.remove_track(5).is_err());
    assert_eq!(o.number_of_tracks(), 2);
    assert_eq!(o.remove_track(0).unwrap().title, "T1");
    assert_eq!(o.track(0).unwrap().title, "T2");
}

#[test]
fn listing_and_searching() {
    let mut o = organizer();
    o.add_file("audio/mystery.mp3");
    assert_eq!(o.number_of_tracks(), 3);

    assert_eq!(o.list_all_tracks().len(), 3);
    assert_eq!(o.list_by_artist("unk").len(), 1);
    assert_eq!(o.list_by_artist("UNK").len(), 0);
    assert_eq!(o.find_in_title("t").len(), 2);
    assert_eq!(
        o.list_track(1).unwrap(),
        "Track 1: B: T2  (file: f2) - plays: 0. album: "
    );
    assert!(o.list_track(3).is_err());

    assert_eq!(o.remove_by_title("T"), 2);
    assert_eq!(o.remove_by_artist("unknown"), 1);
    assert_eq!(o.number_of_tracks(), 0);
}

#[test]
fn load_appends_loader_output() {
    let mut o = organizer();
    let loader = FixedLoader(vec![Track::from_filename("a.mp3"), Track::from_filename("b.mp3")]);
    let added = o.load(&loader, Path::new("audio"), &["mp3".to_string()]);
    assert_eq!(added, 2);
    assert_eq!(o.number_of_tracks(), 4);
    assert_eq!(o.track(3).unwrap().filename, PathBuf::from("b.mp3"));
}
