mod app;
mod audio;
mod command;
mod config;
mod error;
mod library;
mod logging;
mod organizer;
mod playback;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
