//! Interface to the host scene.
//!
//! The exporter never walks a host scene directly. Everything it needs
//! (object enumeration, per-frame world transforms, the shared current
//! frame, static attributes) comes through the [`Scene`] trait.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::ExportSettings;
use crate::util::{Frame, Result, WorldTransform};

/// Stable identifier of an object within one export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub usize);

/// Host object type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Mesh,
    Curve,
    Surface,
    Text,
    Empty,
    Camera,
    Light,
    Armature,
    Other,
}

impl ObjectKind {
    /// Kinds that carry renderable geometry the target understands.
    pub const MESH_LIKE: &'static [ObjectKind] = &[ObjectKind::Mesh];
}

/// Which objects take part in an export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Visible objects that are not hidden.
    #[default]
    Visible,
    /// Currently selected objects.
    Selected,
}

/// Object filter policy handed to [`Scene::objects`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectFilter {
    pub selection: Selection,
    pub kinds: Vec<ObjectKind>,
}

impl Default for ObjectFilter {
    fn default() -> Self {
        Self {
            selection: Selection::Visible,
            kinds: ObjectKind::MESH_LIKE.to_vec(),
        }
    }
}

impl ObjectFilter {
    /// Filter matching the `only_selected` setting.
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self {
            selection: if settings.only_selected { Selection::Selected } else { Selection::Visible },
            ..Self::default()
        }
    }

    /// Whether an object with these flags passes the filter.
    pub fn accepts(&self, kind: ObjectKind, visible: bool, hidden: bool, selected: bool) -> bool {
        let picked = match self.selection {
            Selection::Visible => visible && !hidden,
            Selection::Selected => selected,
        };
        picked && self.kinds.contains(&kind)
    }
}

/// Host scene collaborator.
///
/// The current frame is shared, globally visible host state: transforms are
/// always read at whatever frame was last set.
pub trait Scene {
    /// Scene name, used as the default output file name.
    fn name(&self) -> &str;

    /// Directory the scene is stored in, if it has been saved.
    fn storage_dir(&self) -> Option<&Path>;

    /// Inclusive `(start, end)` frame range of the scene.
    fn frame_range(&self) -> (Frame, Frame);

    fn current_frame(&self) -> Frame;

    fn set_current_frame(&mut self, frame: Frame);

    /// Exportable objects, in scene order.
    fn objects(&self, filter: &ObjectFilter) -> Vec<ObjectId>;

    fn object_name(&self, id: ObjectId) -> String;

    /// World transform of `id` at the current frame.
    ///
    /// Fails with [`Error::ObjectNotFound`](crate::Error::ObjectNotFound) when
    /// the object does not exist at this frame.
    fn world_transform(&self, id: ObjectId) -> Result<WorldTransform>;

    /// Object color, RGBA.
    fn color(&self, id: ObjectId) -> [f64; 4];

    /// Name of the first assigned material, if any.
    fn material(&self, id: ObjectId) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_visible() {
        let filter = ObjectFilter::default();
        assert!(filter.accepts(ObjectKind::Mesh, true, false, false));
        assert!(!filter.accepts(ObjectKind::Mesh, true, true, false));
        assert!(!filter.accepts(ObjectKind::Mesh, false, false, true));
        assert!(!filter.accepts(ObjectKind::Camera, true, false, false));
    }

    #[test]
    fn test_filter_selected() {
        let settings = ExportSettings { only_selected: true, ..Default::default() };
        let filter = ObjectFilter::from_settings(&settings);
        assert_eq!(filter.selection, Selection::Selected);
        assert!(filter.accepts(ObjectKind::Mesh, false, true, true));
        assert!(!filter.accepts(ObjectKind::Mesh, true, false, false));
        assert!(!filter.accepts(ObjectKind::Light, true, false, true));
    }
}
