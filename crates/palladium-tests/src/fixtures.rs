//! Test fixtures: sample scenes and interchange documents.

use palladium_model::{Cube, ModelDocument, NodeId, Part, ProjectMeta, Scene};

/// The single-cube body document.
pub const BODY_MODEL: &str = r#"{
    "texture_width": 64,
    "texture_height": 32,
    "mesh": {
        "body": {
            "cubes": [
                { "origin": [0, 0, 0], "dimensions": [4, 4, 4], "texture_offset": [0, 0] }
            ]
        }
    }
}"#;

/// A humanoid model with nested parts, rotations, and every optional cube
/// field.
pub const BIPED_MODEL: &str = r#"{
    "texture_width": 64,
    "texture_height": 64,
    "mesh": {
        "body": {
            "part_pose": { "offset": [0, -24, 0] },
            "cubes": [
                { "origin": [-4, 0, -2], "dimensions": [8, 12, 4], "texture_offset": [16, 16] }
            ],
            "children": {
                "head": {
                    "cubes": [
                        { "origin": [-4, -8, -4], "dimensions": [8, 8, 8], "texture_offset": [0, 0] },
                        { "name": "hat", "origin": [-4, -8, -4], "dimensions": [8, 8, 8], "texture_offset": [32, 0], "deformation": [0.5, 0.5, 0.5] }
                    ]
                },
                "right_arm": {
                    "part_pose": { "offset": [5, 2, 0], "rotation": [-10, 0, 2.5] },
                    "cubes": [
                        { "origin": [-1, -2, -2], "dimensions": [4, 12, 4], "texture_offset": [40, 16] }
                    ]
                },
                "left_arm": {
                    "part_pose": { "offset": [-5, 2, 0], "rotation": [10, 0, -2.5] },
                    "cubes": [
                        { "origin": [-3, -2, -2], "dimensions": [4, 12, 4], "texture_offset": [40, 16], "mirror": true }
                    ]
                }
            }
        },
        "right_leg": {
            "part_pose": { "offset": [1.9, -12, 0] },
            "cubes": [
                { "origin": [-2, 0, -2], "dimensions": [4, 12, 4], "texture_offset": [0, 16] }
            ]
        },
        "left_leg": {
            "part_pose": { "offset": [-1.9, -12, 0] },
            "cubes": [
                { "origin": [-2, 0, -2], "dimensions": [4, 12, 4], "texture_offset": [0, 16], "mirror": true }
            ]
        }
    }
}"#;

/// Parses [`BIPED_MODEL`].
pub fn biped_document() -> ModelDocument {
    ModelDocument::from_json(BIPED_MODEL).expect("biped fixture should parse")
}

/// Node ids of [`tail_scene`].
#[derive(Debug, Clone, Copy)]
pub struct TailIds {
    pub body: NodeId,
    pub tail: NodeId,
    pub tip: NodeId,
}

/// A three-level chain built directly in editor coordinates.
pub fn tail_scene() -> (Scene, TailIds) {
    let mut scene = Scene::new();
    let body = scene
        .add_part(Part::new("body").with_origin([0.0, 12.0, 0.0]), None)
        .expect("add body");
    scene
        .add_cube(Cube::new([-3.0, 8.0, -5.0], [3.0, 14.0, 5.0]), body)
        .expect("add body cube");

    let tail = scene
        .add_part(
            Part::new("tail")
                .with_origin([0.0, 12.0, 5.0])
                .with_rotation([22.5, 0.0, 0.0]),
            Some(body),
        )
        .expect("add tail");
    scene
        .add_cube(
            Cube::new([-1.0, 11.0, 5.0], [1.0, 13.0, 11.0]).with_uv_offset([0.0, 20.0]),
            tail,
        )
        .expect("add tail cube");

    let tip = scene
        .add_part(
            Part::new("tip")
                .with_origin([0.0, 12.0, 11.0])
                .with_rotation([0.0, 15.0, 0.0]),
            Some(tail),
        )
        .expect("add tip");
    scene
        .add_cube(
            Cube::new([-0.5, 11.5, 11.0], [0.5, 12.5, 14.0])
                .named("tuft")
                .with_inflate(0.25)
                .with_mirror_uv(true),
            tip,
        )
        .expect("add tip cube");

    (scene, TailIds { body, tail, tip })
}

/// Project metadata used with [`tail_scene`].
pub fn tail_meta() -> ProjectMeta {
    ProjectMeta::new(32, 32)
}
