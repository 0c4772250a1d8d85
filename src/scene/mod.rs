//! Host scene access.
//!
//! - [`Scene`] - The collaborator interface the exporter reads through
//! - [`SceneSnapshot`] - A scene captured as JSON data

mod snapshot;
mod traits;

pub use snapshot::*;
pub use traits::*;
