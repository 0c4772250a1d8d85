//! Frame sweep across all tracked objects.
//!
//! The sweep is strictly sequential: each step moves the host's shared
//! current frame and then reads every object's transform at that frame.
//! The host frame is saved before the sweep and restored afterwards by a
//! [`FrameGuard`], including when the sweep unwinds.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use tracing::{debug, info_span, trace, warn};

use super::sampler::{Motion, SamplerState};
use crate::core::FrameRange;
use crate::scene::{ObjectId, Scene};
use crate::util::{ExportWarning, Frame};

/// Saves the host's current frame and restores it on drop.
pub struct FrameGuard<'a, S: Scene + ?Sized> {
    scene: &'a mut S,
    saved: Frame,
}

impl<'a, S: Scene + ?Sized> FrameGuard<'a, S> {
    pub fn new(scene: &'a mut S) -> Self {
        let saved = scene.current_frame();
        Self { scene, saved }
    }

    /// Frame that will be restored.
    pub fn saved_frame(&self) -> Frame {
        self.saved
    }
}

impl<S: Scene + ?Sized> Deref for FrameGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.scene
    }
}

impl<S: Scene + ?Sized> DerefMut for FrameGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.scene
    }
}

impl<S: Scene + ?Sized> Drop for FrameGuard<'_, S> {
    fn drop(&mut self) {
        debug!("restoring host frame {}", self.saved);
        self.scene.set_current_frame(self.saved);
    }
}

#[derive(Debug)]
enum Slot {
    /// Not sampled yet.
    Pending,
    Sampling(SamplerState),
    /// Vanished mid-sweep; keeps what was sampled.
    Lost(SamplerState),
    /// Excluded from the export, along with anything sampled before.
    Skipped,
}

#[derive(Debug)]
struct Tracked {
    name: String,
    slot: Slot,
}

/// Per-object sampling outcome of a sweep.
#[derive(Debug, Default)]
pub struct BakeResult {
    /// Finalized motion per object. Skipped objects are absent.
    pub motions: BTreeMap<ObjectId, Motion>,
    pub warnings: Vec<ExportWarning>,
}

impl BakeResult {
    /// Number of objects whose track carries keyframes.
    pub fn animated_count(&self) -> usize {
        self.motions.values().filter(|m| m.is_animated()).count()
    }
}

/// Owns the sampler state of every tracked object for one sweep.
#[derive(Debug)]
pub struct TrackBuilder {
    range: FrameRange,
    tracked: BTreeMap<ObjectId, Tracked>,
    warnings: Vec<ExportWarning>,
}

impl TrackBuilder {
    /// Register a fixed object list before sampling begins.
    pub fn new<S: Scene + ?Sized>(range: FrameRange, objects: &[ObjectId], scene: &S) -> Self {
        let tracked = objects
            .iter()
            .map(|&id| (id, Tracked { name: scene.object_name(id), slot: Slot::Pending }))
            .collect();
        Self { range, tracked, warnings: Vec::new() }
    }

    /// Sample every still-tracked object at `frame`.
    ///
    /// The scene must already be at `frame`.
    pub fn sample_frame<S: Scene + ?Sized>(&mut self, scene: &S, frame: Frame) {
        trace!("sampling frame {frame}");
        for (&id, tracked) in &mut self.tracked {
            let slot = std::mem::replace(&mut tracked.slot, Slot::Skipped);
            tracked.slot = match slot {
                Slot::Pending | Slot::Sampling(_) => match scene.world_transform(id) {
                    Err(e) => {
                        warn!("{}: {e} at frame {frame}", tracked.name);
                        let object = tracked.name.clone();
                        match slot {
                            Slot::Sampling(state) => {
                                self.warnings.push(ExportWarning::ObjectLost { object, frame });
                                Slot::Lost(state)
                            }
                            _ => {
                                self.warnings.push(ExportWarning::ObjectMissing { object, frame });
                                Slot::Skipped
                            }
                        }
                    }
                    Ok(transform) if !transform.is_decomposable() => {
                        warn!("{}: transform at frame {frame} is not decomposable", tracked.name);
                        self.warnings.push(ExportWarning::DegenerateTransform {
                            object: tracked.name.clone(),
                            frame,
                        });
                        Slot::Skipped
                    }
                    Ok(transform) => match slot {
                        Slot::Sampling(mut state) => {
                            state.sample(&self.range, frame, transform);
                            Slot::Sampling(state)
                        }
                        _ => Slot::Sampling(SamplerState::new(frame, transform)),
                    },
                },
                done => done,
            };
        }
    }

    /// Finalize every object's track.
    pub fn finish(self) -> BakeResult {
        let mut motions = BTreeMap::new();
        for (id, tracked) in self.tracked {
            match tracked.slot {
                Slot::Sampling(state) | Slot::Lost(state) => {
                    let motion = state.finish();
                    debug!(
                        "{}: {}",
                        tracked.name,
                        match &motion {
                            Motion::Static(_) => "static".to_string(),
                            Motion::Animated(keys) => format!("{} keyframes", keys.len()),
                        }
                    );
                    motions.insert(id, motion);
                }
                Slot::Pending | Slot::Skipped => {}
            }
        }
        BakeResult { motions, warnings: self.warnings }
    }
}

/// Sweep `range` over `objects`, restoring the host frame afterwards.
pub fn bake<S: Scene + ?Sized>(scene: &mut S, objects: &[ObjectId], range: FrameRange) -> BakeResult {
    let _span = info_span!("bake", objects = objects.len(), frames = range.num_samples()).entered();

    let mut guard = FrameGuard::new(scene);
    let mut builder = TrackBuilder::new(range, objects, &*guard);
    for frame in range.frames() {
        guard.set_current_frame(frame);
        builder.sample_frame(&*guard, frame);
    }
    drop(guard);

    builder.finish()
}
