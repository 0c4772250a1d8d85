//! Host-to-target transform conversion.
//!
//! The host scene is Z-up with radians; the target runtime is Y-up, reads
//! Euler angles in degrees composed Y, then X, then Z, and mirrors the
//! rotation direction. Every sampled world transform goes through
//! [`convert`] before it becomes a keyframe or a static pose.

use crate::core::ConvertedPose;
use crate::util::{swap_yz, DMat3, DMat4, DVec3, WorldTransform};

/// Below this, cos(pitch) is treated as zero and yaw/roll share one angle.
const GIMBAL_EPSILON: f64 = 1e-12;

/// Translation, orthonormal rotation basis, and non-negative scale of a
/// host world matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    pub translation: DVec3,
    pub rotation: DMat3,
    pub scale: DVec3,
}

/// Split an affine matrix into translation, rotation and scale.
///
/// Scale is the length of each basis column. Collapsed columns (zero scale)
/// are rebuilt from the surviving ones so the rotation stays a proper
/// orthonormal basis; a mirrored basis is flipped back the way the host does.
pub fn decompose(m: &DMat4) -> Decomposed {
    let cols = [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()];
    let scale = DVec3::new(cols[0].length(), cols[1].length(), cols[2].length());
    let mut axes = cols.map(DVec3::normalize_or_zero);

    let live: Vec<usize> = (0..3).filter(|&i| axes[i] != DVec3::ZERO).collect();
    match live.len() {
        3 => {}
        2 => {
            let dead = (0..3).find(|i| !live.contains(i)).unwrap_or(0);
            axes[dead] = axes[(dead + 1) % 3].cross(axes[(dead + 2) % 3]).normalize_or_zero();
        }
        1 => {
            let j = live[0];
            let (b, _) = axes[j].any_orthonormal_pair();
            axes[(j + 1) % 3] = b;
            axes[(j + 2) % 3] = axes[j].cross(b);
        }
        _ => axes = [DVec3::X, DVec3::Y, DVec3::Z],
    }

    let mut rotation = DMat3::from_cols(axes[0], axes[1], axes[2]);
    if rotation.determinant() < 0.0 {
        rotation = -rotation;
    }

    Decomposed {
        translation: m.w_axis.truncate(),
        rotation,
        scale,
    }
}

/// Euler angles `[x, y, z]` in radians of a rotation composed Y first, then
/// X, then Z (`R = Rz * Rx * Ry`).
pub fn euler_yxz(r: &DMat3) -> [f64; 3] {
    // m[row][col] == r.col(col)[row]
    let m00 = r.x_axis.x;
    let m20 = r.x_axis.z;
    let m01 = r.y_axis.x;
    let m11 = r.y_axis.y;
    let m21 = r.y_axis.z;
    let m02 = r.z_axis.x;
    let m22 = r.z_axis.z;

    let cos_x = m20.hypot(m22);
    let x = m21.atan2(cos_x);
    if cos_x > GIMBAL_EPSILON {
        let y = (-m20).atan2(m22);
        let z = (-m01).atan2(m11);
        [x, y, z]
    } else {
        // Gimbal lock: fold all of the remaining turn into Y
        [x, m02.atan2(m00), 0.0]
    }
}

/// Radians in host direction to degrees in target direction.
#[inline]
fn to_target_degrees(radians: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    -radians.to_degrees() + 0.0
}

/// Convert a host world transform into a target-space pose.
///
/// Total for any finite matrix. Callers check
/// [`WorldTransform::is_decomposable`] first; non-finite input yields
/// non-finite output.
pub fn convert(transform: &WorldTransform) -> ConvertedPose {
    let Decomposed { translation, rotation, scale } = decompose(transform.matrix());
    let euler = euler_yxz(&rotation);

    ConvertedPose {
        position: swap_yz(translation.to_array()),
        rotation: swap_yz(euler).map(to_target_degrees),
        scale: swap_yz(scale.to_array()).map(f64::abs),
    }
}
