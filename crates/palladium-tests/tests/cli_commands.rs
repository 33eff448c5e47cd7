//! CLI command flows over files in a scratch directory.

use palladium_cli::commands::{compile, formats, inspect, load, verify};
use palladium_model::{ModelDocument, Part, Scene, DEFAULT_TOLERANCE, MAX_PART_DEPTH};
use palladium_tests::fixtures::{tail_meta, tail_scene, BIPED_MODEL, BODY_MODEL};
use palladium_tests::harness::assert_success;
use palladium_tests::TestHarness;
use pretty_assertions::assert_eq;
use std::process::ExitCode;

#[test]
fn compile_then_load_restores_the_scene() {
    let harness = TestHarness::new();
    let (scene, _) = tail_scene();
    let snapshot = harness.write_snapshot("scene.json", &scene, tail_meta());

    let model = harness.file("tail.json");
    assert_success(compile::run(&snapshot, Some(model.as_str())));

    let doc = ModelDocument::from_json(&harness.read("tail.json")).unwrap();
    assert_eq!(doc.texture_width, 32);
    assert_eq!(doc.part_count(), 3);

    let restored = harness.file("restored.json");
    assert_success(load::run(&model, Some(restored.as_str())));

    let (loaded, meta) = harness.read_snapshot("restored.json");
    assert_eq!(meta, tail_meta());
    assert_eq!(loaded, scene);
}

#[test]
fn compiled_output_uses_four_space_indent_and_integers() {
    let harness = TestHarness::new();
    let (scene, _) = tail_scene();
    let snapshot = harness.write_snapshot("scene.json", &scene, tail_meta());
    let model = harness.file("tail.json");
    assert_success(compile::run(&snapshot, Some(model.as_str())));

    let text = harness.read("tail.json");
    assert!(text.starts_with("{\n    \"texture_width\": 32,"));
    assert!(text.contains("\"texture_offset\": [\n"));
    assert!(!text.contains("12.0"));
}

#[test]
fn compile_refuses_scenes_nested_too_deep() {
    let harness = TestHarness::new();
    let mut scene = Scene::new();
    let mut parent = None;
    for _ in 0..=MAX_PART_DEPTH {
        parent = Some(scene.add_part(Part::new("link"), parent).unwrap());
    }
    let snapshot = harness.write_snapshot("deep.json", &scene, tail_meta());

    let model = harness.file("deep_model.json");
    let err = compile::run(&snapshot, Some(model.as_str())).unwrap_err();
    assert!(format!("{:#}", err).contains("nested deeper than"));
    assert!(!harness.path().join("deep_model.json").exists());
}

#[test]
fn verify_accepts_fixture_models() {
    let harness = TestHarness::new();
    for (name, content) in [("body.json", BODY_MODEL), ("biped.json", BIPED_MODEL)] {
        harness.write(name, content);
        assert_success(verify::run(&harness.file(name), DEFAULT_TOLERANCE, false));
        assert_success(verify::run(&harness.file(name), DEFAULT_TOLERANCE, true));
    }
}

#[test]
fn verify_flags_lossy_models() {
    let harness = TestHarness::new();
    harness.write(
        "lossy.json",
        r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {
            "cubes": [{"origin": [0, 0, 0], "dimensions": [1, 1, 1], "texture_offset": [0, 0], "deformation": [1, 0, 0]}]
        }}}"#,
    );

    let code = verify::run(&harness.file("lossy.json"), DEFAULT_TOLERANCE, false).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn inspect_reads_fixture() {
    let harness = TestHarness::new();
    harness.write("biped.json", BIPED_MODEL);
    assert_success(inspect::run(&harness.file("biped.json"), false));
    assert_success(inspect::run(&harness.file("biped.json"), true));

    let doc = ModelDocument::from_json(BIPED_MODEL).unwrap();
    let paths: Vec<_> = inspect::summarize(&doc).into_iter().map(|p| p.path).collect();
    assert_eq!(
        paths,
        vec![
            "body",
            "body/head",
            "body/right_arm",
            "body/left_arm",
            "right_leg",
            "left_leg",
        ]
    );
}

#[test]
fn load_rejects_missing_metadata() {
    let harness = TestHarness::new();
    harness.write("broken.json", r#"{"texture_height": 32, "mesh": {}}"#);

    let err = load::run(&harness.file("broken.json"), None).unwrap_err();
    assert!(format!("{:#}", err).contains("texture_width"));
}

#[test]
fn formats_lists_palladium() {
    assert_success(formats::run(true));
}
