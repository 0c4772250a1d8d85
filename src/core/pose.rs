//! Target-space pose and keyframe values.

/// Object pose in the target convention (Y-up, degrees).
///
/// Produced by [`convert`](crate::geom::convert) and never mutated afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConvertedPose {
    pub position: [f64; 3],
    /// Euler angles in degrees.
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl ConvertedPose {
    /// Create a pose from its three components.
    pub const fn new(position: [f64; 3], rotation: [f64; 3], scale: [f64; 3]) -> Self {
        Self { position, rotation, scale }
    }
}

/// A pose tagged with its normalized time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub pose: ConvertedPose,
}

impl Keyframe {
    pub const fn new(time: f64, pose: ConvertedPose) -> Self {
        Self { time, pose }
    }

    /// Position channel entry: `[x, y, z, t]`.
    #[inline]
    pub fn position(&self) -> [f64; 4] {
        with_time(self.pose.position, self.time)
    }

    /// Rotation channel entry: `[x, y, z, t]`.
    #[inline]
    pub fn rotation(&self) -> [f64; 4] {
        with_time(self.pose.rotation, self.time)
    }

    /// Scale channel entry: `[x, y, z, t]`.
    #[inline]
    pub fn scale(&self) -> [f64; 4] {
        with_time(self.pose.scale, self.time)
    }
}

#[inline]
fn with_time(v: [f64; 3], t: f64) -> [f64; 4] {
    [v[0], v[1], v[2], t]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframe_channels() {
        let pose = ConvertedPose::new([1.0, 2.0, 3.0], [10.0, 20.0, 30.0], [1.0, 1.0, 2.0]);
        let key = Keyframe::new(0.25, pose);
        assert_eq!(key.position(), [1.0, 2.0, 3.0, 0.25]);
        assert_eq!(key.rotation(), [10.0, 20.0, 30.0, 0.25]);
        assert_eq!(key.scale(), [1.0, 1.0, 2.0, 0.25]);
    }
}
