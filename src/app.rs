//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the organizer, the
//! selection, the active filter and the command line.

mod model;

pub use model::*;
