//! Frame range sweeps for animation baking.
//!
//! A [`FrameRange`] describes which host frames are sampled during an
//! animated export and how a frame maps onto the normalized `[0, 1]` time
//! axis written to keyframes.

use crate::util::{Error, Frame, Result};

/// Inclusive frame range sampled with a fixed stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    start: Frame,
    end: Frame,
    step: Frame,
}

impl FrameRange {
    /// Create a range over `[start, end]` sampled every `sample_rate` frames.
    ///
    /// Rejects a non-positive stride and any range whose normalization would
    /// divide by zero or run backwards.
    pub fn new(start: Frame, end: Frame, sample_rate: i64) -> Result<Self> {
        if sample_rate < 1 {
            return Err(Error::config(format!("sample_rate must be >= 1, got {sample_rate}")));
        }
        if end == start {
            return Err(Error::config(format!(
                "cannot export animation over a single frame ({start})"
            )));
        }
        if end < start {
            return Err(Error::config(format!(
                "frame range is reversed: start {start} > end {end}"
            )));
        }
        Ok(Self { start, end, step: sample_rate })
    }

    /// First frame of the range.
    #[inline]
    pub fn start(&self) -> Frame {
        self.start
    }

    /// Last frame of the range (always sampled).
    #[inline]
    pub fn end(&self) -> Frame {
        self.end
    }

    /// Sampling stride in frames.
    #[inline]
    pub fn step(&self) -> Frame {
        self.step
    }

    /// Map a frame onto normalized time: `start` is 0.0, `end` is 1.0.
    #[inline]
    pub fn normalize(&self, frame: Frame) -> f64 {
        (i128::from(frame) - i128::from(self.start)) as f64 / self.span() as f64
    }

    /// Width of the range in frames, widened so extreme bounds cannot overflow.
    #[inline]
    fn span(&self) -> i128 {
        i128::from(self.end) - i128::from(self.start)
    }

    /// Number of frames [`frames`](Self::frames) yields.
    pub fn num_samples(&self) -> usize {
        let span = self.span();
        let step = i128::from(self.step);
        let clamped = if span % step == 0 { 0 } else { 1 };
        usize::try_from(span / step + 1 + clamped).unwrap_or(usize::MAX)
    }

    /// Iterate the sampled frames: `start`, `start + step`, ... and finally
    /// `end` exactly once, with the last stride clamped down onto `end`.
    pub fn frames(&self) -> Frames {
        Frames { next: Some(self.start), end: self.end, step: self.step }
    }
}

/// Iterator over the sampled frames of a [`FrameRange`].
#[derive(Clone, Debug)]
pub struct Frames {
    next: Option<Frame>,
    end: Frame,
    step: Frame,
}

impl Iterator for Frames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let current = self.next?;
        self.next = if current >= self.end {
            None
        } else {
            Some(current.checked_add(self.step).map_or(self.end, |f| f.min(self.end)))
        };
        Some(current)
    }
}
