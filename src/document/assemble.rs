//! Builds an [`ExportDocument`] from a scene.

use tracing::{debug, info, warn};

use super::schema::{ExportDocument, ObjectRecord};
use crate::anim::bake;
use crate::core::FrameRange;
use crate::geom::convert;
use crate::scene::{ObjectFilter, ObjectId, Scene};
use crate::settings::ExportSettings;
use crate::util::{ExportWarning, Result};

/// Assembled document plus the warnings raised while building it.
#[derive(Debug, Default)]
pub struct Assembled {
    pub document: ExportDocument,
    pub warnings: Vec<ExportWarning>,
}

/// Build the document for `scene`.
///
/// Configuration is validated before any object is sampled. With
/// animations enabled the whole frame range is baked; otherwise every
/// object is sampled once at the current frame.
pub fn assemble<S: Scene + ?Sized>(scene: &mut S, settings: &ExportSettings) -> Result<Assembled> {
    settings.validate()?;
    let range = if settings.export_animations {
        let (start, end) = scene.frame_range();
        Some(FrameRange::new(start, end, settings.sample_rate)?)
    } else {
        None
    };

    let filter = ObjectFilter::from_settings(settings);
    let objects = scene.objects(&filter);
    info!("assembling {} objects ({:?})", objects.len(), filter.selection);

    let assembled = match range {
        Some(range) => assemble_animated(scene, &objects, range),
        None => assemble_static(scene, &objects),
    };
    Ok(assembled)
}

fn record_for<S: Scene + ?Sized>(scene: &S, id: ObjectId, build: impl FnOnce(String, [f64; 4], Option<String>) -> ObjectRecord) -> ObjectRecord {
    build(scene.object_name(id), scene.color(id), scene.material(id))
}

fn assemble_static<S: Scene + ?Sized>(scene: &S, objects: &[ObjectId]) -> Assembled {
    let frame = scene.current_frame();
    let mut records = Vec::with_capacity(objects.len());
    let mut warnings = Vec::new();

    for &id in objects {
        let name = scene.object_name(id);
        let warning = match scene.world_transform(id) {
            Ok(t) if t.is_decomposable() => {
                let pose = convert(&t);
                debug!("{name}: static at frame {frame}");
                records.push(record_for(scene, id, |n, c, g| ObjectRecord::from_pose(n, &pose, c, g)));
                continue;
            }
            Ok(_) => ExportWarning::DegenerateTransform { object: name, frame },
            Err(_) => ExportWarning::ObjectMissing { object: name, frame },
        };
        warn!("{warning}");
        warnings.push(warning);
    }

    Assembled { document: ExportDocument::new(records), warnings }
}

fn assemble_animated<S: Scene + ?Sized>(scene: &mut S, objects: &[ObjectId], range: FrameRange) -> Assembled {
    let mut baked = bake(scene, objects, range);

    let records = objects
        .iter()
        .filter_map(|id| {
            let motion = baked.motions.remove(id)?;
            Some(record_for(&*scene, *id, |n, c, g| ObjectRecord::from_motion(n, &motion, c, g)))
        })
        .collect();

    Assembled { document: ExportDocument::new(records), warnings: baked.warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::XformOp;
    use crate::scene::{SceneSnapshot, SnapshotObject};

    fn scene() -> SceneSnapshot {
        SceneSnapshot::new("doc", 0, 10)
            .with_current_frame(10)
            .with_object(
                SnapshotObject::mesh("crate")
                    .with_color([0.5, 0.5, 0.5, 1.0])
                    .with_material("Wood")
                    .with_sample(0, vec![XformOp::translate(0.0, 0.0, 1.0)]),
            )
            .with_object(
                SnapshotObject::mesh("door")
                    .with_sample(0, vec![XformOp::rotate_z(0.0)])
                    .with_sample(6, vec![XformOp::rotate_z(90.0)]),
            )
    }

    #[test]
    fn test_animated_document() {
        let mut scene = scene();
        let out = assemble(&mut scene, &ExportSettings::default()).unwrap();
        let doc = out.document;

        assert_eq!(doc.objects.len(), 2);
        assert_eq!(doc.animated_count(), 1);
        assert!(out.warnings.is_empty());

        let crate_rec = &doc.objects[0];
        assert_eq!(crate_rec.name, "crate");
        assert_eq!(crate_rec.group.as_deref(), Some("Wood"));
        assert_eq!(crate_rec.color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(crate_rec.position.first_value(), Some([0.0, 1.0, 0.0]));

        let door = &doc.objects[1];
        assert_eq!(door.keyframe_count(), 2);
        assert_eq!(door.group, None);
        assert_eq!(scene.current_frame, 10);
    }

    #[test]
    fn test_static_document_uses_current_frame() {
        let mut scene = scene();
        let settings = ExportSettings { export_animations: false, ..Default::default() };
        let doc = assemble(&mut scene, &settings).unwrap().document;

        assert_eq!(doc.animated_count(), 0);
        let rot = doc.objects[1].rotation.first_value().unwrap();
        assert!((rot[1] + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_frame_animation_rejected() {
        let mut scene = SceneSnapshot::new("one", 5, 5).with_object(SnapshotObject::mesh("a"));
        let err = assemble(&mut scene, &ExportSettings::default()).unwrap_err();
        assert!(err.is_configuration());

        // Fine without animation
        let settings = ExportSettings { export_animations: false, ..Default::default() };
        assert_eq!(assemble(&mut scene, &settings).unwrap().document.objects.len(), 1);
    }

    #[test]
    fn test_degenerate_static_object_skipped() {
        let mut scene = scene().with_object(
            SnapshotObject::mesh("broken").with_sample(0, vec![XformOp::scale(f64::INFINITY, 1.0, 1.0)]),
        );
        let settings = ExportSettings { export_animations: false, ..Default::default() };
        let out = assemble(&mut scene, &settings).unwrap();
        assert_eq!(out.document.objects.len(), 2);
        assert_eq!(
            out.warnings,
            vec![ExportWarning::DegenerateTransform { object: "broken".into(), frame: 10 }]
        );
    }

    #[test]
    fn test_missing_static_object_reported() {
        let mut scene = scene();
        let objects = scene.objects(&ObjectFilter::default());
        scene.objects[0].removed_at = Some(10);

        let out = assemble_static(&scene, &objects);
        assert_eq!(out.document.objects.len(), 1);
        assert_eq!(
            out.warnings,
            vec![ExportWarning::ObjectMissing { object: "crate".into(), frame: 10 }]
        );
    }

    #[test]
    fn test_settings_validated_before_listing() {
        let mut scene = scene();
        let settings = ExportSettings { export_animations: false, sample_rate: 0, ..Default::default() };
        assert!(assemble(&mut scene, &settings).unwrap_err().is_configuration());
        assert_eq!(scene.current_frame, 10);
    }
}
