//! Core value types shared by the baking engine and the document layer.
//!
//! - [`FrameRange`] - Stepped frame sweep and time normalization
//! - [`ConvertedPose`] / [`Keyframe`] - Target-space pose data

mod frame_range;
mod pose;

pub use frame_range::*;
pub use pose::*;
