//! Rest-aware keyframe reduction for a single object.
//!
//! The sampler consumes the object's world transform once per sampled frame
//! and keeps only the keyframes needed to reproduce its motion:
//!
//! - a change of transform emits a keyframe at the frame it was observed;
//! - a run of identical samples emits nothing while it lasts, and when motion
//!   resumes a *hold* keyframe carrying the resting pose is emitted at the
//!   last resting frame, so the consumer keeps the pose flat until then;
//! - the first change of an object that was never at rest also anchors its
//!   starting pose at the start of the range.
//!
//! Rest detection uses exact matrix equality. Transforms that differ by any
//! amount count as motion.

use crate::core::{ConvertedPose, FrameRange, Keyframe};
use crate::geom::convert;
use crate::util::{Frame, WorldTransform};

/// Final result of sampling one object.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// The object never moved; its pose at the first sample.
    Static(ConvertedPose),
    /// The object moved; keyframes in strictly increasing time order.
    Animated(Vec<Keyframe>),
}

impl Motion {
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Per-object sampling state.
#[derive(Clone, Debug)]
pub struct SamplerState {
    last_transform: WorldTransform,
    last_pose: ConvertedPose,
    last_frame: Frame,
    has_rested: bool,
    base: ConvertedPose,
    keyframes: Vec<Keyframe>,
}

impl SamplerState {
    /// Start tracking an object from its first sample.
    ///
    /// The first sample never emits a keyframe; its pose becomes the static
    /// base pose.
    pub fn new(frame: Frame, transform: WorldTransform) -> Self {
        let pose = convert(&transform);
        Self {
            last_transform: transform,
            last_pose: pose,
            last_frame: frame,
            has_rested: false,
            base: pose,
            keyframes: Vec::new(),
        }
    }

    /// Feed the transform observed at `frame`.
    ///
    /// Frames must be fed in increasing order, as produced by
    /// [`FrameRange::frames`].
    pub fn sample(&mut self, range: &FrameRange, frame: Frame, transform: WorldTransform) {
        if transform == self.last_transform {
            self.has_rested = true;
            self.last_frame = frame;
            return;
        }

        if self.has_rested {
            let hold = range.normalize(self.last_frame);
            self.push(hold, self.last_pose);
        } else if self.keyframes.is_empty() {
            self.push(range.normalize(range.start()), self.last_pose);
        }

        let pose = convert(&transform);
        self.push(range.normalize(frame), pose);

        self.last_transform = transform;
        self.last_pose = pose;
        self.last_frame = frame;
        self.has_rested = false;
    }

    fn push(&mut self, time: f64, pose: ConvertedPose) {
        debug_assert!(
            self.keyframes.last().is_none_or(|k| k.time < time),
            "keyframe times must strictly increase"
        );
        self.keyframes.push(Keyframe::new(time, pose));
    }

    /// Whether the latest sample matched the one before it.
    #[inline]
    pub fn has_rested(&self) -> bool {
        self.has_rested
    }

    /// Pose of the first sample.
    #[inline]
    pub fn base_pose(&self) -> &ConvertedPose {
        &self.base
    }

    /// Keyframes emitted so far.
    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Frame of the latest sample.
    #[inline]
    pub fn last_frame(&self) -> Frame {
        self.last_frame
    }

    /// Finalize: keyframes replace the static pose if there are any.
    pub fn finish(self) -> Motion {
        if self.keyframes.is_empty() {
            Motion::Static(self.base)
        } else {
            Motion::Animated(self.keyframes)
        }
    }
}
