//! Transform handling: host operations and host-to-target conversion.

mod convert;
mod xform;

pub use convert::*;
pub use xform::*;
