//! Math type re-exports and exporter-specific math utilities.
//!
//! This module re-exports the double precision types from `glam` and
//! provides the host transform wrapper plus the axis remap used when
//! converting a Z-up host scene into the Y-up target convention.

// Re-export glam types
pub use glam::{DMat3, DMat4, DQuat, DVec3, DVec4};

use std::fmt;

/// Host-space world transform of one object at one frame.
///
/// Equality is exact component-wise equality of the matrix. Rest detection
/// relies on this: two transforms that differ in the last bit are motion.
#[derive(Clone, Copy, PartialEq)]
pub struct WorldTransform(pub DMat4);

impl WorldTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    /// Wrap a world matrix.
    #[inline]
    pub const fn new(matrix: DMat4) -> Self {
        Self(matrix)
    }

    /// Build from translation, rotation and scale in host convention.
    #[inline]
    pub fn from_trs(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self(DMat4::from_scale_rotation_translation(scale, rotation, translation))
    }

    /// Build from a translation only.
    #[inline]
    pub fn from_translation(translation: DVec3) -> Self {
        Self(DMat4::from_translation(translation))
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.0
    }

    /// Whether the matrix can be decomposed into translation/rotation/scale.
    ///
    /// Zero scale is allowed (it decomposes to a zero scale axis); only
    /// non-finite components make a transform unusable.
    pub fn is_decomposable(&self) -> bool {
        self.0.is_finite()
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for WorldTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorldTransform({:?})", self.0.to_cols_array_2d())
    }
}

impl From<DMat4> for WorldTransform {
    fn from(m: DMat4) -> Self {
        Self(m)
    }
}

/// Remap a host-order `[a, b, c]` triple to target order `[a, c, b]`.
///
/// Applying it twice is the identity.
#[inline]
pub fn swap_yz(v: [f64; 3]) -> [f64; 3] {
    [v[0], v[2], v[1]]
}

/// Frame number on the host timeline.
pub type Frame = i64;
