//! Host transform operations.
//!
//! Scene snapshots describe an object's world transform as an ordered list
//! of operations in the host convention (Z-up, degrees). The list composes
//! left to right into a single world matrix.

use serde::{Deserialize, Serialize};

use crate::util::{DMat4, DVec3, WorldTransform};

/// A single transform operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XformOp {
    Scale([f64; 3]),
    Translate([f64; 3]),
    /// Rotation around X, degrees.
    RotateX(f64),
    /// Rotation around Y, degrees.
    RotateY(f64),
    /// Rotation around Z, degrees.
    RotateZ(f64),
    /// Axis (x, y, z) + angle in degrees.
    Rotate([f64; 4]),
    /// Row-major 4x4 matrix.
    Matrix([f64; 16]),
}

impl XformOp {
    /// Create a scale operation.
    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Self::Scale([x, y, z])
    }

    /// Create a translate operation.
    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        Self::Translate([x, y, z])
    }

    /// Create a rotation around X axis (angle in degrees).
    pub fn rotate_x(angle: f64) -> Self {
        Self::RotateX(angle)
    }

    /// Create a rotation around Y axis (angle in degrees).
    pub fn rotate_y(angle: f64) -> Self {
        Self::RotateY(angle)
    }

    /// Create a rotation around Z axis (angle in degrees).
    pub fn rotate_z(angle: f64) -> Self {
        Self::RotateZ(angle)
    }

    /// The matrix this operation contributes.
    pub fn matrix(&self) -> DMat4 {
        match *self {
            Self::Scale(s) => DMat4::from_scale(DVec3::from_array(s)),
            Self::Translate(t) => DMat4::from_translation(DVec3::from_array(t)),
            Self::RotateX(angle) => DMat4::from_rotation_x(angle.to_radians()),
            Self::RotateY(angle) => DMat4::from_rotation_y(angle.to_radians()),
            Self::RotateZ(angle) => DMat4::from_rotation_z(angle.to_radians()),
            Self::Rotate([x, y, z, angle]) => {
                let axis = DVec3::new(x, y, z).normalize_or_zero();
                if axis.length_squared() > 0.0 {
                    DMat4::from_axis_angle(axis, angle.to_radians())
                } else {
                    DMat4::IDENTITY
                }
            }
            // Stored row-major, glam is column-major
            Self::Matrix(v) => DMat4::from_cols_array(&v).transpose(),
        }
    }
}

/// Transform sample: an ordered list of operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XformSample {
    pub ops: Vec<XformOp>,
}

impl XformSample {
    /// Create identity xform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a sample from operations.
    pub fn new(ops: Vec<XformOp>) -> Self {
        Self { ops }
    }

    /// Compute the final 4x4 transformation matrix.
    pub fn matrix(&self) -> DMat4 {
        // Column vectors: right-multiply so the first op is outermost
        self.ops.iter().fold(DMat4::IDENTITY, |acc, op| acc * op.matrix())
    }

    /// World transform described by this sample.
    pub fn world_transform(&self) -> WorldTransform {
        WorldTransform::new(self.matrix())
    }
}
