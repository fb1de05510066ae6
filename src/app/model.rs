//! Application model types: `App`, `InputMode`, `ViewFilter` and `Status`.
//!
//! The `App` struct owns the organizer and holds the selection, the active
//! filter and the command line used by the UI and runtime.

use std::fmt::Display;

use tracing::warn;

use crate::command::{self, Command, ListScope};
use crate::library::Track;
use crate::organizer::Organizer;
use crate::playback::Player;

const NO_SELECTION: &str = "no track selected";

/// What keystrokes currently edit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing narrows the list by title.
    Filter,
    /// Typing builds a `:` command.
    Command,
}

/// Restricts the visible tracks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewFilter {
    #[default]
    None,
    /// Case-sensitive artist substring.
    Artist(String),
    /// Case-insensitive title substring.
    Title(String),
}

/// Last message shown in the status box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The main application model.
pub struct App<P> {
    pub organizer: Organizer<P>,
    pub selected: usize,
    pub mode: InputMode,
    pub input: String,
    pub filter: ViewFilter,
    pub status: Option<Status>,
    pub current_dir: Option<String>,
    /// Text shown in the popup window, if one is open.
    pub popup: Option<String>,
    config_text: Option<String>,
}

impl<P: Player> App<P> {
    /// Create a new `App` around `organizer`.
    pub fn new(organizer: Organizer<P>) -> Self {
        Self {
            organizer,
            selected: 0,
            mode: InputMode::Normal,
            input: String::new(),
            filter: ViewFilter::None,
            status: None,
            current_dir: None,
            popup: None,
            config_text: None,
        }
    }

    /// Record the library directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Text shown by the `config` command.
    pub fn set_config_text(&mut self, text: String) {
        self.config_text = Some(text);
    }

    /// The selected track index, or `None` when the current view hides it.
    pub fn selected_index(&self) -> Option<usize> {
        self.display_indices()
            .contains(&self.selected)
            .then_some(self.selected)
    }

    /// An explicit command index, else the visible selection.
    fn target(&mut self, index: Option<usize>) -> Option<usize> {
        let target = index.or_else(|| self.selected_index());
        if target.is_none() {
            self.error(NO_SELECTION);
        }
        target
    }

    /// Track indices visible under the current filter, in store order.
    pub fn display_indices(&self) -> Vec<usize> {
        let store = self.organizer.store();
        match &self.filter {
            ViewFilter::None => (0..store.count()).collect(),
            ViewFilter::Artist(a) => store.find_by_artist(a).into_iter().map(|(i, _)| i).collect(),
            ViewFilter::Title(t) => store.find_by_title(t).into_iter().map(|(i, _)| i).collect(),
        }
    }

    fn info(&mut self, msg: impl Into<String>) {
        self.status = Some(Status::Info(msg.into()));
    }

    fn error(&mut self, err: impl Display) {
        warn!(error = %err, "command failed");
        self.status = Some(Status::Error(err.to_string()));
    }

    /// Set the selected track index and ensure it is visible in the display.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    /// Keep `selected` inside the current view: the nearest visible track at
    /// or after it, else the last visible one.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }
        if !display.contains(&self.selected) {
            self.selected = display
                .iter()
                .copied()
                .find(|&i| i >= self.selected)
                .unwrap_or(display[display.len() - 1]);
        }
    }

    /// Move selection to the next visible track, wrapping around.
    pub fn next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible track, wrapping around.
    pub fn prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }

    /// Start typing a title filter.
    pub fn enter_filter_mode(&mut self) {
        self.mode = InputMode::Filter;
        self.input.clear();
        self.popup = None;
    }

    /// Start typing a `:` command.
    pub fn enter_command_mode(&mut self) {
        self.mode = InputMode::Command;
        self.input.clear();
        self.popup = None;
    }

    /// Leave filter/command mode. A typed title filter stays active.
    pub fn leave_input_mode(&mut self) {
        self.mode = InputMode::Normal;
        self.input.clear();
    }

    /// Append a character to the input line; in filter mode the view follows.
    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
        self.refresh_live_filter();
    }

    /// Remove the last character from the input line.
    pub fn pop_input_char(&mut self) {
        self.input.pop();
        self.refresh_live_filter();
    }

    fn refresh_live_filter(&mut self) {
        if self.mode != InputMode::Filter {
            return;
        }
        self.filter = if self.input.is_empty() {
            ViewFilter::None
        } else {
            ViewFilter::Title(self.input.clone())
        };
        self.ensure_selected_visible();
    }

    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
        self.ensure_selected_visible();
    }

    /// Drop the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.set_filter(ViewFilter::None);
        self.leave_input_mode();
    }

    pub fn toggle_details(&mut self) {
        self.popup = match self.popup {
            Some(_) => None,
            None => Some(match self.selected_index() {
                Some(i) => self.organizer.list_track(i).unwrap_or_else(|e| e.to_string()),
                None => NO_SELECTION.to_string(),
            }),
        };
    }

    /// Parse and run the command line. Returns `true` when the user asked to quit.
    pub fn submit_command(&mut self) -> bool {
        let line = std::mem::take(&mut self.input);
        self.mode = InputMode::Normal;
        match command::parse(&line) {
            Ok(cmd) => self.execute(cmd),
            Err(command::ParseError::Empty) => false,
            Err(e) => {
                self.error(e);
                false
            }
        }
    }

    /// Run `cmd` against the organizer. Returns `true` for [`Command::Quit`].
    pub fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Play(index) => {
                if let Some(i) = self.target(index) {
                    self.play(i);
                }
            }
            Command::PlayFirst => match self.organizer.play_first() {
                Ok(true) => {
                    self.set_selected(0);
                    self.report_now_playing(0);
                }
                Ok(false) => self.info("the library is empty"),
                Err(e) => self.error(e),
            },
            Command::Stop => {
                self.organizer.stop_playing();
                self.info("stopped");
            }
            Command::Remove(index) => {
                if let Some(i) = self.target(index) {
                    self.remove(i);
                }
            }
            Command::ResetPlays(index) => {
                let Some(index) = self.target(index) else {
                    return false;
                };
                match self.organizer.reset_play_count(index) {
                    Ok(()) => self.info(format!("track {index}: play count reset")),
                    Err(e) => self.error(e),
                }
            }
            Command::RemoveArtist(artist) => {
                let above = self.matches_above_selection(self.organizer.store().find_by_artist(&artist));
                let n = self.organizer.remove_by_artist(&artist);
                self.info(format!("removed {n} track(s) by artist \"{artist}\""));
                self.shift_selection_up(above);
            }
            Command::RemoveTitle(title) => {
                let above = self.matches_above_selection(self.organizer.store().find_by_title(&title));
                let n = self.organizer.remove_by_title(&title);
                self.info(format!("removed {n} track(s) with \"{title}\" in the title"));
                self.shift_selection_up(above);
            }
            Command::Album { index, album } => {
                let Some(index) = self.target(index) else {
                    return false;
                };
                match self.organizer.set_track_album(index, album.as_str()) {
                    Ok(()) => self.info(format!("track {index}: album set to \"{album}\"")),
                    Err(e) => self.error(e),
                }
            }
            Command::FilterArtist(artist) => self.set_filter(ViewFilter::Artist(artist)),
            Command::FilterTitle(title) => self.set_filter(ViewFilter::Title(title)),
            Command::ClearFilter => self.clear_filter(),
            Command::List(scope) => {
                let (heading, lines) = match &scope {
                    ListScope::All => ("Track listing:".to_string(), self.organizer.list_all_tracks()),
                    ListScope::Artist(a) => (format!("Tracks by \"{a}\":"), self.organizer.list_by_artist(a)),
                    ListScope::Title(t) => (format!("Titles with \"{t}\":"), self.organizer.find_in_title(t)),
                };
                let mut text = heading;
                for line in lines {
                    text.push('\n');
                    text.push_str(&line);
                }
                self.popup = Some(text);
            }
            Command::Add(path) => {
                self.info(format!("added {}", path.display()));
                self.organizer.add_file(path);
            }
            Command::Status => {
                let state = if self.organizer.is_playing() {
                    "a playback is in progress"
                } else {
                    "no playback in progress"
                };
                let n = self.organizer.number_of_tracks();
                self.info(format!("{state} ({n} tracks)"));
            }
            Command::Config => {
                self.popup = Some(
                    self.config_text
                        .clone()
                        .unwrap_or_else(|| "no configuration loaded".to_string()),
                );
            }
            Command::Quit => return true,
        }
        false
    }

    /// Play the track at `index`, reporting a running playback or a bad index.
    pub fn play(&mut self, index: usize) {
        match self.organizer.play_track(index) {
            Ok(()) => self.report_now_playing(index),
            Err(e) => self.error(e),
        }
    }

    pub fn play_selected(&mut self) {
        self.execute(Command::Play(None));
    }

    pub fn stop(&mut self) {
        self.execute(Command::Stop);
    }

    pub fn remove(&mut self, index: usize) {
        match self.organizer.remove_track(index) {
            Ok(track) => {
                self.info(format!("removed {} - {}", track.artist, track.title));
                self.shift_selection_up(usize::from(index < self.selected));
            }
            Err(e) => self.error(e),
        }
    }

    pub fn remove_selected(&mut self) {
        self.execute(Command::Remove(None));
    }

    /// How many of `matches` sit before the selection.
    fn matches_above_selection(&self, matches: Vec<(usize, &Track)>) -> usize {
        matches.iter().filter(|(i, _)| *i < self.selected).count()
    }

    /// Keep the highlight on the same track after `removed` rows above it
    /// went away.
    fn shift_selection_up(&mut self, removed: usize) {
        self.selected = self.selected.saturating_sub(removed);
        self.ensure_selected_visible();
    }

    fn report_now_playing(&mut self, index: usize) {
        if let Ok(track) = self.organizer.track(index) {
            let msg = format!("now playing: {} - {}", track.artist, track.title);
            self.info(msg);
        }
    }
}
