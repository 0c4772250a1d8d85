//! Utility types and functions for the exporter.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] / [`ExportWarning`] - Error handling
//! - [`WorldTransform`], [`swap_yz`] - Math helpers and glam re-exports

mod error;
mod math;

pub use error::*;
pub use math::*;
