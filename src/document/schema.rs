//! `.rmmodel` document schema.
//!
//! Current documents (version 2):
//!
//! ```json
//! {
//!   "version": 2,
//!   "objects": [
//!     { "position": [0, 1, 0], "rotation": [0, 90, 0], "scale": [1, 1, 1],
//!       "color": [1, 1, 1, 1], "group": "Wall" },
//!     { "position": [[0, 0, 0, 0], [0, 4, 0, 1]], "rotation": [[0, 0, 0, 0], [0, 0, 0, 1]],
//!       "scale": [[1, 1, 1, 0], [1, 1, 1, 1]], "color": [1, 0, 0, 1] }
//!   ]
//! }
//! ```
//!
//! Animated channels append the normalized time as a fourth element.
//! Legacy documents have no `version` field and name the channels
//! `pos`/`rot`/`scale` with no color or group.

use serde::{Deserialize, Serialize};

use crate::anim::Motion;
use crate::core::{ConvertedPose, Keyframe};
use crate::util::{Error, Result};

/// Version tag written to every document.
pub const FORMAT_VERSION: u64 = 2;

/// Document file extension (without the dot).
pub const FILE_EXTENSION: &str = "rmmodel";

/// Position, rotation or scale of one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    Static([f64; 3]),
    /// `[x, y, z, t]` entries in increasing `t`.
    Animated(Vec<[f64; 4]>),
}

impl Channel {
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }

    /// Number of keyframes; a static channel counts as none.
    pub fn keyframe_count(&self) -> usize {
        match self {
            Self::Static(_) => 0,
            Self::Animated(keys) => keys.len(),
        }
    }

    /// Value at the first keyframe, or the static value.
    pub fn first_value(&self) -> Option<[f64; 3]> {
        match self {
            Self::Static(v) => Some(*v),
            Self::Animated(keys) => keys.first().map(|k| [k[0], k[1], k[2]]),
        }
    }
}

/// One exported object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Host object name; not part of the wire format.
    #[serde(skip)]
    pub name: String,
    pub position: Channel,
    pub rotation: Channel,
    pub scale: Channel,
    pub color: [f64; 4],
    /// First material of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ObjectRecord {
    /// Record for an object that did not move.
    pub fn from_pose(name: impl Into<String>, pose: &ConvertedPose, color: [f64; 4], group: Option<String>) -> Self {
        Self {
            name: name.into(),
            position: Channel::Static(pose.position),
            rotation: Channel::Static(pose.rotation),
            scale: Channel::Static(pose.scale),
            color,
            group,
        }
    }

    /// Record for an animated object.
    pub fn from_keyframes(name: impl Into<String>, keys: &[Keyframe], color: [f64; 4], group: Option<String>) -> Self {
        Self {
            name: name.into(),
            position: Channel::Animated(keys.iter().map(Keyframe::position).collect()),
            rotation: Channel::Animated(keys.iter().map(Keyframe::rotation).collect()),
            scale: Channel::Animated(keys.iter().map(Keyframe::scale).collect()),
            color,
            group,
        }
    }

    /// Record for a finalized track.
    pub fn from_motion(name: impl Into<String>, motion: &Motion, color: [f64; 4], group: Option<String>) -> Self {
        match motion {
            Motion::Static(pose) => Self::from_pose(name, pose, color, group),
            Motion::Animated(keys) => Self::from_keyframes(name, keys, color, group),
        }
    }

    /// Whether any channel carries keyframes.
    pub fn is_animated(&self) -> bool {
        self.position.is_animated() || self.rotation.is_animated() || self.scale.is_animated()
    }

    /// Keyframes per channel (all channels share one timeline).
    pub fn keyframe_count(&self) -> usize {
        self.position.keyframe_count()
    }
}

/// Root of a current-version document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u64,
    pub objects: Vec<ObjectRecord>,
}

impl Default for ExportDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExportDocument {
    /// New document with the current version tag.
    pub fn new(objects: Vec<ObjectRecord>) -> Self {
        Self { version: FORMAT_VERSION, objects }
    }

    /// Number of objects with keyframes.
    pub fn animated_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_animated()).count()
    }

    /// Compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a current-version document. Use [`AnyDocument::from_json`]
    /// to accept legacy documents too.
    pub fn from_json(text: &str) -> Result<Self> {
        match AnyDocument::from_json(text)? {
            AnyDocument::Current(doc) => Ok(doc),
            AnyDocument::Legacy(_) => Err(Error::invalid("legacy document has no version tag")),
        }
    }
}

/// Object of a legacy (unversioned) document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyObject {
    pub pos: Channel,
    pub rot: Channel,
    pub scale: Channel,
}

/// Root of a legacy (unversioned) document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDocument {
    pub objects: Vec<LegacyObject>,
}

impl LegacyDocument {
    /// Rename the channels and tag the result with the current version.
    /// Legacy objects carry no color; they come out opaque white.
    pub fn upgrade(self) -> ExportDocument {
        ExportDocument::new(
            self.objects
                .into_iter()
                .map(|o| ObjectRecord {
                    name: String::new(),
                    position: o.pos,
                    rotation: o.rot,
                    scale: o.scale,
                    color: [1.0, 1.0, 1.0, 1.0],
                    group: None,
                })
                .collect(),
        )
    }
}

/// Any document this crate can read, tagged by schema.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyDocument {
    /// No version field.
    Legacy(LegacyDocument),
    Current(ExportDocument),
}

impl AnyDocument {
    /// Parse and dispatch on the `version` field.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let version = match value.as_object() {
            Some(root) => root.get("version").map(|v| {
                v.as_u64()
                    .ok_or_else(|| Error::invalid(format!("version is not an integer: {v}")))
            }),
            None => return Err(Error::invalid("document root is not an object")),
        };

        match version.transpose()? {
            None => Ok(Self::Legacy(serde_json::from_value(value)?)),
            Some(FORMAT_VERSION) => Ok(Self::Current(serde_json::from_value(value)?)),
            Some(other) => Err(Error::UnsupportedVersion(other)),
        }
    }

    /// Read a document file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Version tag, `None` for legacy documents.
    pub fn version(&self) -> Option<u64> {
        match self {
            Self::Legacy(_) => None,
            Self::Current(doc) => Some(doc.version),
        }
    }

    /// View as a current document, upgrading legacy ones.
    pub fn into_current(self) -> ExportDocument {
        match self {
            Self::Legacy(doc) => doc.upgrade(),
            Self::Current(doc) => doc,
        }
    }
}
