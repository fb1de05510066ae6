use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::command::Command;
use crate::config;
use crate::playback::Player;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input and UI drawing.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<P: Player>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<P>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, settings))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the app should quit.
fn handle_key_event<P: Player>(key: KeyEvent, app: &mut App<P>, state: &mut EventLoopState) -> bool {
    if app.mode != InputMode::Normal {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                if app.mode == InputMode::Filter {
                    app.clear_filter();
                } else {
                    app.leave_input_mode();
                }
            }
            KeyCode::Backspace => {
                if app.input.is_empty() {
                    app.leave_input_mode();
                } else {
                    app.pop_input_char();
                }
            }
            KeyCode::Enter => {
                if app.mode == InputMode::Command {
                    return app.submit_command();
                }
                app.leave_input_mode();
            }
            KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Esc => {
            app.clear_filter();
            app.popup = None;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('p') => {
            app.execute(Command::PlayFirst);
        }
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('d') => app.remove_selected(),
        KeyCode::Char('K') => app.toggle_details(),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Track;
    use crate::organizer::Organizer;
    use crate::playback::tests::RecordingPlayer;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App<RecordingPlayer>, state: &mut EventLoopState, code: KeyCode) -> bool {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app, state)
    }

    fn app() -> App<RecordingPlayer> {
        App::new(Organizer::with_tracks(
            RecordingPlayer::default(),
            vec![
                Track::new("A", "T1", "f1"),
                Track::new("B", "T2", "f2"),
                Track::new("C", "T3", "f3"),
            ],
        ))
    }

    #[test]
    fn gg_and_shift_g_jump_to_ends() {
        let mut app = app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char('G'));
        assert_eq!(app.selected, 2);
        press(&mut app, &mut state, KeyCode::Char('g'));
        assert_eq!(app.selected, 2);
        press(&mut app, &mut state, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn enter_plays_and_s_stops() {
        let mut app = app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char('j'));
        press(&mut app, &mut state, KeyCode::Enter);
        assert!(app.organizer.is_playing());
        assert_eq!(app.organizer.track(1).unwrap().play_count, 1);

        press(&mut app, &mut state, KeyCode::Char('s'));
        assert!(!app.organizer.is_playing());
    }

    #[test]
    fn command_line_is_typed_then_run() {
        let mut app = app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char(':'));
        for c in "rm 0".chars() {
            assert!(!press(&mut app, &mut state, KeyCode::Char(c)));
        }
        assert!(!press(&mut app, &mut state, KeyCode::Enter));
        assert_eq!(app.organizer.number_of_tracks(), 2);

        press(&mut app, &mut state, KeyCode::Char(':'));
        press(&mut app, &mut state, KeyCode::Char('q'));
        assert!(press(&mut app, &mut state, KeyCode::Enter));
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char('/'));
        assert!(!press(&mut app, &mut state, KeyCode::Char('q')));
        press(&mut app, &mut state, KeyCode::Esc);
        assert_eq!(app.mode, InputMode::Normal);
        assert!(press(&mut app, &mut state, KeyCode::Char('q')));
    }
}
