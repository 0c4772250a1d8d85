//! JSON scene snapshots.
//!
//! A snapshot is a host scene written out as plain data: scene metadata,
//! object flags and attributes, and sparse transform samples. It implements
//! [`Scene`] so the exporter can run outside the host, from the command line
//! and in tests.
//!
//! ```json
//! {
//!   "name": "intro",
//!   "frame_start": 1,
//!   "frame_end": 120,
//!   "objects": [
//!     {
//!       "name": "Cube",
//!       "color": [1.0, 0.0, 0.0, 1.0],
//!       "materials": ["Wall"],
//!       "samples": [
//!         { "frame": 1, "ops": [{ "translate": [0, 0, 0] }] },
//!         { "frame": 60, "ops": [{ "translate": [0, 0, 4] }, { "rotate_z": 90 }] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{ObjectFilter, ObjectId, ObjectKind, Scene};
use crate::geom::{XformOp, XformSample};
use crate::util::{Error, Frame, Result, WorldTransform};

fn default_true() -> bool {
    true
}

fn default_color() -> [f64; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

/// Transform of an object from `frame` until the next sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSample {
    pub frame: Frame,
    #[serde(default)]
    pub ops: XformSample,
}

/// One object of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "default_color")]
    pub color: [f64; 4],
    /// Assigned materials in slot order.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Sorted by frame.
    #[serde(default)]
    pub samples: Vec<SnapshotSample>,
    /// First frame at which the object no longer exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<Frame>,
}

impl SnapshotObject {
    /// A visible mesh with no samples (identity transform).
    pub fn mesh(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            visible: true,
            hidden: false,
            selected: false,
            color: default_color(),
            materials: Vec::new(),
            samples: Vec::new(),
            removed_at: None,
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_color(mut self, color: [f64; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.push(material.into());
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Add a transform sample, keeping samples sorted by frame.
    pub fn with_sample(mut self, frame: Frame, ops: Vec<XformOp>) -> Self {
        let at = self.samples.partition_point(|s| s.frame <= frame);
        self.samples.insert(at, SnapshotSample { frame, ops: XformSample::new(ops) });
        self
    }

    /// Transform in effect at `frame`: the latest sample at or before it,
    /// else the first sample, else identity.
    pub fn transform_at(&self, frame: Frame) -> WorldTransform {
        let idx = self.samples.partition_point(|s| s.frame <= frame);
        self.samples
            .get(idx.saturating_sub(1))
            .map(|s| s.ops.world_transform())
            .unwrap_or_default()
    }

    /// Whether the object exists at `frame`.
    pub fn exists_at(&self, frame: Frame) -> bool {
        self.removed_at.is_none_or(|removed| frame < removed)
    }
}

/// A host scene captured as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub name: String,
    /// Where the scene is stored; unsaved scenes have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub frame_start: Frame,
    pub frame_end: Frame,
    #[serde(default)]
    pub current_frame: Frame,
    #[serde(default)]
    pub objects: Vec<SnapshotObject>,
}

impl SceneSnapshot {
    /// An empty, unsaved scene.
    pub fn new(name: impl Into<String>, frame_start: Frame, frame_end: Frame) -> Self {
        Self {
            name: name.into(),
            directory: None,
            frame_start,
            frame_end,
            current_frame: frame_start,
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: SnapshotObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    pub fn with_current_frame(mut self, frame: Frame) -> Self {
        self.current_frame = frame;
        self
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(text)?;
        snapshot.normalize()?;
        Ok(snapshot)
    }

    /// Load a snapshot file. Unless the file names a directory, the scene
    /// is treated as stored next to the snapshot.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("scene snapshot not found: {}", path.display()),
            )));
        }
        let mut snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        if snapshot.directory.is_none() {
            snapshot.directory = path
                .canonicalize()
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf));
        }
        debug!(
            "loaded snapshot '{}' ({} objects, frames {}..={})",
            snapshot.name,
            snapshot.objects.len(),
            snapshot.frame_start,
            snapshot.frame_end
        );
        Ok(snapshot)
    }

    fn normalize(&mut self) -> Result<()> {
        for object in &mut self.objects {
            if object.name.is_empty() {
                return Err(Error::invalid("object with empty name"));
            }
            object.samples.sort_by_key(|s| s.frame);
        }
        Ok(())
    }

    fn object(&self, id: ObjectId) -> Result<&SnapshotObject> {
        self.objects
            .get(id.0)
            .ok_or_else(|| Error::ObjectNotFound(format!("#{}", id.0)))
    }
}

impl Scene for SceneSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage_dir(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn frame_range(&self) -> (Frame, Frame) {
        (self.frame_start, self.frame_end)
    }

    fn current_frame(&self) -> Frame {
        self.current_frame
    }

    fn set_current_frame(&mut self, frame: Frame) {
        self.current_frame = frame;
    }

    fn objects(&self, filter: &ObjectFilter) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.exists_at(self.current_frame))
            .filter(|(_, o)| filter.accepts(o.kind, o.visible, o.hidden, o.selected))
            .map(|(i, _)| ObjectId(i))
            .collect()
    }

    fn object_name(&self, id: ObjectId) -> String {
        self.objects
            .get(id.0)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }

    fn world_transform(&self, id: ObjectId) -> Result<WorldTransform> {
        let object = self.object(id)?;
        if !object.exists_at(self.current_frame) {
            return Err(Error::ObjectNotFound(object.name.clone()));
        }
        Ok(object.transform_at(self.current_frame))
    }

    fn color(&self, id: ObjectId) -> [f64; 4] {
        self.objects.get(id.0).map_or_else(default_color, |o| o.color)
    }

    fn material(&self, id: ObjectId) -> Option<String> {
        self.objects.get(id.0)?.materials.first().cloned()
    }
}
