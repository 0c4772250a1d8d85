//! # rmmodel
//!
//! Bakes the animated transforms of a 3D scene into `.rmmodel` documents:
//! compact JSON keyframe tracks read by the ReMapper runtime.
//!
//! Each exported object is sampled across the scene's frame range, converted
//! from the host convention (Z-up, radians) into the target convention (Y-up,
//! degrees, Euler order Y-X-Z), and reduced to the sparse set of keyframes
//! that still reproduces when motion starts and stops.
//!
//! ## Modules
//!
//! - [`util`] - Errors, warnings, math helpers
//! - [`core`] - Frame ranges, poses, keyframes
//! - [`geom`] - Host transform operations and host-to-target conversion
//! - [`anim`] - Rest-aware sampling and the frame sweep
//! - [`scene`] - Host scene interface and JSON scene snapshots
//! - [`document`] - Document schema and assembly
//! - [`settings`] - Persistent export settings
//! - [`export`] - Export entry point
//!
//! ## Example
//!
//! ```ignore
//! use rmmodel::prelude::*;
//!
//! let mut scene = SceneSnapshot::open("intro.scene.json")?;
//! let summary = export_scene(&mut scene, &ExportSettings::default())?;
//! println!("{summary}");
//! ```

pub mod util;
pub mod core;
pub mod geom;
pub mod anim;
pub mod scene;
pub mod document;
pub mod settings;
pub mod export;

// Re-export commonly used types
pub use util::{Error, ExportWarning, Result};
pub use export::{export_scene, ExportSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, ExportWarning, Result, WorldTransform};
    pub use crate::core::{ConvertedPose, FrameRange, Keyframe};
    pub use crate::geom::{convert, XformOp, XformSample};
    pub use crate::anim::{bake, Motion, SamplerState, TrackBuilder};
    pub use crate::scene::{ObjectFilter, ObjectId, ObjectKind, Scene, SceneSnapshot, SnapshotObject};
    pub use crate::document::{AnyDocument, Channel, ExportDocument, ObjectRecord};
    pub use crate::settings::ExportSettings;
    pub use crate::export::{export_scene, ExportSummary};
}
