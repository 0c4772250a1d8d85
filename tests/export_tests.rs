//! End-to-end export tests: scene snapshot in, .rmmodel document out.

use rmmodel::document::{AnyDocument, Channel, ExportDocument};
use rmmodel::prelude::*;

use tempfile::TempDir;

fn shift(x: f64) -> Vec<XformOp> {
    vec![XformOp::translate(x, 0.0, 0.0)]
}

/// Export into a fresh temp dir and read the document back.
fn export_and_read(mut scene: SceneSnapshot, settings: &ExportSettings) -> (TempDir, ExportSummary, ExportDocument) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    scene.directory = Some(dir.path().to_path_buf());
    let summary = export_scene(&mut scene, settings).expect("Export failed");
    let doc = AnyDocument::open(&summary.path).expect("Failed to read document");
    (dir, summary, doc.into_current())
}

fn animated(channel: &Channel) -> &[[f64; 4]] {
    match channel {
        Channel::Animated(keys) => keys,
        Channel::Static(_) => panic!("expected animated channel"),
    }
}

#[test]
fn test_resting_collapse_end_to_end() {
    let scene = SceneSnapshot::new("rest", 0, 20).with_object(
        SnapshotObject::mesh("block")
            .with_sample(0, shift(0.0))
            .with_sample(10, shift(3.0)),
    );
    let (_dir, summary, doc) = export_and_read(scene, &ExportSettings::default());

    assert_eq!(summary.animated, 1);
    let keys = animated(&doc.objects[0].position);
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], [0.0, 0.0, 0.0, 9.0 / 20.0]);
    assert_eq!(keys[1], [3.0, 0.0, 0.0, 10.0 / 20.0]);
    assert_eq!(animated(&doc.objects[0].rotation).len(), 2);
    assert_eq!(animated(&doc.objects[0].scale).len(), 2);
}

#[test]
fn test_never_moves_has_no_keyframes() {
    for rate in [1, 2, 4, 100] {
        let scene = SceneSnapshot::new("still", 0, 12)
            .with_object(SnapshotObject::mesh("rock").with_sample(0, shift(2.0)));
        let settings = ExportSettings { sample_rate: rate, ..Default::default() };
        let (_dir, _, doc) = export_and_read(scene, &settings);

        let rock = &doc.objects[0];
        assert!(!rock.is_animated(), "rate {rate}");
        assert_eq!(rock.position, Channel::Static([2.0, 0.0, 0.0]));
        assert_eq!(rock.scale, Channel::Static([1.0, 1.0, 1.0]));
    }
}

#[test]
fn test_always_moves_keys_every_frame() {
    let mut object = SnapshotObject::mesh("runner");
    for frame in 0..=10 {
        object = object.with_sample(frame, shift(frame as f64));
    }
    let scene = SceneSnapshot::new("run", 0, 10).with_object(object);
    let (_dir, _, doc) = export_and_read(scene, &ExportSettings::default());

    let keys = animated(&doc.objects[0].position);
    assert_eq!(keys.len(), 11);
    for (i, key) in keys.iter().enumerate() {
        assert!((key[3] - i as f64 * 0.1).abs() < 1e-12);
        assert_eq!(key[0], i as f64);
    }
    assert!(keys.windows(2).all(|w| w[0][3] < w[1][3]));
}

#[test]
fn test_sample_rate_clamps_last_step() {
    let range = FrameRange::new(0, 10, 4).unwrap();
    assert_eq!(range.frames().collect::<Vec<_>>(), vec![0, 4, 8, 10]);

    // Frame 10 is only reachable through the clamped step
    let scene = SceneSnapshot::new("stride", 0, 10).with_object(
        SnapshotObject::mesh("late")
            .with_sample(0, shift(0.0))
            .with_sample(9, shift(1.0)),
    );
    let settings = ExportSettings { sample_rate: 4, ..Default::default() };
    let (_dir, _, doc) = export_and_read(scene, &settings);

    let keys = animated(&doc.objects[0].position);
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0][3], 0.8);
    assert_eq!(keys[1][3], 1.0);
}

#[test]
fn test_stride_wider_than_any_range() {
    let scene = SceneSnapshot::new("leap", 1, 10).with_object(
        SnapshotObject::mesh("hop")
            .with_sample(1, shift(0.0))
            .with_sample(10, shift(5.0)),
    );
    let settings = ExportSettings { sample_rate: i64::MAX, ..Default::default() };
    let (_dir, _, doc) = export_and_read(scene, &settings);

    let keys = animated(&doc.objects[0].position);
    assert_eq!(keys, &[[0.0, 0.0, 0.0, 0.0], [5.0, 0.0, 0.0, 1.0]][..]);
}

#[test]
fn test_single_frame_animation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = SceneSnapshot::new("flat", 3, 3)
        .with_directory(dir.path())
        .with_object(SnapshotObject::mesh("a"));

    let err = export_scene(&mut scene, &ExportSettings::default()).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_sample_rate_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = SceneSnapshot::new("s", 0, 10).with_directory(dir.path());
    let settings = ExportSettings { sample_rate: 0, ..Default::default() };

    assert!(export_scene(&mut scene, &settings).unwrap_err().is_configuration());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unsaved_scene_needs_absolute_path() {
    let mut scene = SceneSnapshot::new("unsaved", 0, 10).with_object(SnapshotObject::mesh("a"));
    let err = export_scene(&mut scene, &ExportSettings::default()).unwrap_err();
    assert!(err.is_configuration());

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("explicit");
    let settings = ExportSettings {
        filename: Some(target.display().to_string()),
        ..Default::default()
    };
    let summary = export_scene(&mut scene, &settings).unwrap();
    assert_eq!(summary.path, dir.path().join("explicit.rmmodel"));
}

#[test]
fn test_filters_and_attributes() {
    let scene = SceneSnapshot::new("filters", 0, 10)
        .with_object(
            SnapshotObject::mesh("wall")
                .with_color([0.2, 0.4, 0.6, 1.0])
                .with_material("Brick")
                .with_material("Mortar"),
        )
        .with_object(SnapshotObject::mesh("ghost").with_hidden(true).with_selected(true))
        .with_object(SnapshotObject::mesh("sun").with_kind(ObjectKind::Light));

    let (_dir, summary, doc) = export_and_read(scene.clone(), &ExportSettings::default());
    assert_eq!(summary.objects, 1);
    assert_eq!(doc.objects[0].color, [0.2, 0.4, 0.6, 1.0]);
    assert_eq!(doc.objects[0].group.as_deref(), Some("Brick"));

    let settings = ExportSettings { only_selected: true, ..Default::default() };
    let (_dir, summary, doc) = export_and_read(scene, &settings);
    assert_eq!(summary.objects, 1);
    assert_eq!(doc.objects[0].group, None);
}

#[test]
fn test_object_removed_mid_sweep() {
    let mut doomed = SnapshotObject::mesh("doomed")
        .with_sample(0, shift(0.0))
        .with_sample(2, shift(1.0));
    doomed.removed_at = Some(5);
    let scene = SceneSnapshot::new("loss", 0, 10)
        .with_object(doomed)
        .with_object(SnapshotObject::mesh("stays"));

    let (_dir, summary, doc) = export_and_read(scene, &ExportSettings::default());
    assert_eq!(summary.objects, 2);
    assert_eq!(
        summary.warnings,
        vec![ExportWarning::ObjectLost { object: "doomed".into(), frame: 5 }]
    );
    assert!(summary.to_string().contains("1 warning"));
    assert_eq!(animated(&doc.objects[0].position).len(), 2);
}

#[test]
fn test_host_frame_restored_after_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = SceneSnapshot::new("frames", 0, 30)
        .with_directory(dir.path())
        .with_current_frame(17)
        .with_object(SnapshotObject::mesh("a").with_sample(5, shift(1.0)).with_sample(25, shift(2.0)));

    export_scene(&mut scene, &ExportSettings::default()).unwrap();
    assert_eq!(scene.current_frame, 17);
}

#[test]
fn test_snapshot_file_roundtrip_export() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("shot.json");
    std::fs::write(
        &scene_path,
        r#"{
            "name": "shot",
            "frame_start": 1,
            "frame_end": 5,
            "objects": [
                { "name": "Door", "materials": ["Oak"],
                  "samples": [ { "frame": 1, "ops": [{ "rotate_z": 0 }] },
                               { "frame": 3, "ops": [{ "rotate_z": 90 }] } ] }
            ]
        }"#,
    )
    .unwrap();

    let mut scene = SceneSnapshot::open(&scene_path).unwrap();
    let summary = export_scene(&mut scene, &ExportSettings::default()).unwrap();
    assert_eq!(summary.path.file_name().unwrap(), "shot.rmmodel");
    assert_eq!(summary.path.parent().unwrap(), scene_path.canonicalize().unwrap().parent().unwrap());

    let doc = ExportDocument::from_json(&std::fs::read_to_string(&summary.path).unwrap()).unwrap();
    let rot = animated(&doc.objects[0].rotation);
    // hold at frame 2, turn at frame 3
    assert_eq!(rot.len(), 2);
    assert_eq!(rot[0][3], 0.25);
    assert_eq!(rot[1][3], 0.5);
    assert!((rot[1][1] + 90.0).abs() < 1e-9);
}
