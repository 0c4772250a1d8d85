//! Animation baking: per-object rest-aware sampling and the frame sweep
//! that drives it.

mod sampler;
mod track;

pub use sampler::*;
pub use track::*;
