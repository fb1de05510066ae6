use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, Status};
use crate::audio::AudioPlayer;
use crate::library::FolderLoader;
use crate::logging;
use crate::organizer::Organizer;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, fallback) = settings::load_settings();

    if let Some(dir) = env::args_os().nth(1) {
        settings.library.folder = PathBuf::from(dir);
    }

    let log_file = logging::init(&settings.log);
    if let Some(reason) = fallback {
        warn!("{reason}");
    }
    info!(log_file = ?log_file, folder = %settings.library.folder.display(), "starting");

    let loader = FolderLoader::from_settings(&settings.library);
    let mut organizer = Organizer::new(AudioPlayer::new(settings.audio.clone()));
    let loaded = organizer.load(&loader, &settings.library.folder, &settings.library.extensions);

    let mut app = App::new(organizer);
    app.set_current_dir(settings.library.folder.display().to_string());
    match settings.to_toml() {
        Ok(text) => app.set_config_text(text),
        Err(e) => warn!(error = %e, "could not render settings"),
    }
    app.status = Some(Status::Info(format!("Music library loaded. {loaded} tracks.")));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.organizer
        .player()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("bye");

    run_result
}
