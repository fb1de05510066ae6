//! Track library: the track record, the in-memory store and the folder loader.
//!
//! Tracks are identified by their position in the [`TrackStore`]; the loader
//! only produces the initial list.

mod display;
mod model;
mod scan;
mod store;

pub use display::row_from_fields;
pub use model::Track;
pub use scan::{FolderLoader, LibraryLoader};
pub use store::TrackStore;
