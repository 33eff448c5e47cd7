//! Palladium Entity Model Library
//!
//! This crate converts between an editor scene graph of parts ("bones") and
//! cubes with absolute transforms, and the nested JSON interchange format
//! read by the Palladium mod, where every part is positioned relative to its
//! parent and every cube relative to its part.
//!
//! # Overview
//!
//! - **Compile** walks the scene graph top-down and produces a [`ModelDocument`]
//! - **Load** walks a [`ModelDocument`] top-down and creates scene nodes
//! - **Adapter** converts between the two axis conventions
//! - **Codec** wraps both walks behind a text-in, text-out [`Codec`]
//!
//! # Example
//!
//! ```
//! use palladium_model::{Codec, Cube, PalladiumCodec, Part, ProjectMeta, Scene};
//!
//! let mut scene = Scene::new();
//! let body = scene
//!     .add_part(Part::new("body").with_origin([0.0, 24.0, 0.0]), None)
//!     .unwrap();
//! scene
//!     .add_cube(Cube::new([-4.0, 12.0, -2.0], [4.0, 24.0, 2.0]), body)
//!     .unwrap();
//!
//! let codec = PalladiumCodec;
//! let json = codec.compile(&scene, ProjectMeta::new(64, 32)).unwrap();
//! assert!(json.contains("\"part_pose\""));
//!
//! let (loaded, meta) = codec.load(&json).unwrap();
//! assert_eq!(meta.texture_width, 64);
//! assert_eq!(loaded.len(), scene.len());
//! ```
//!
//! # Modules
//!
//! - [`adapter`]: Axis flips, rotation sign flips, and vector helpers
//! - [`scene`]: Scene graph types and scene snapshots
//! - [`index`]: Consistent parent-to-children index over a scene
//! - [`interchange`]: Interchange document types
//! - [`compile`]: Scene graph to interchange document
//! - [`load`]: Interchange document to scene graph
//! - [`diff`]: Structural comparison of documents within a tolerance
//! - [`codec`]: Text codec
//! - [`format`]: Format descriptors, host actions, and the format registry
//! - [`error`]: Error types

pub mod adapter;
pub mod codec;
pub mod compile;
pub mod diff;
pub mod error;
pub mod format;
pub mod index;
pub mod interchange;
pub mod load;
pub mod scene;

// Re-export commonly used types at the crate root
pub use adapter::{flip_position, flip_rotation, is_zero, Vec2, Vec3, ZERO};
pub use codec::{Codec, PalladiumCodec, CODEC_ID, FILE_EXTENSION};
pub use compile::{compile_cube, compile_part, compile_scene};
pub use diff::{diff_documents, Difference, DEFAULT_TOLERANCE};
pub use error::{ModelError, ModelResult, RegistryError};
pub use format::{
    Action, FormatFeatures, FormatRegistry, Host, MenuBar, ModelFormat, PluginInfo, EXPORT_MENU,
    PLUGIN,
};
pub use index::SceneIndex;
pub use interchange::{
    InterchangeCube, InterchangePart, ModelDocument, PartPose, MAX_PART_DEPTH,
};
pub use load::{load_cube, load_document, load_into, load_part};
pub use scene::{
    Cube, NodeId, NodeKind, Part, ProjectMeta, Scene, SceneNode, SceneSnapshot, SnapshotNode,
    DEFAULT_CUBE_NAME,
};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// The single-cube body model loads and re-serializes unchanged.
    #[test]
    fn test_body_document_round_trip() {
        let json = r#"{
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

        let doc = ModelDocument::from_json(json).expect("should parse");
        let (scene, meta) = load_document(&doc).expect("should load");

        assert_eq!(scene.roots().len(), 1);
        let body = scene.find_part("body").expect("body part");
        assert_eq!(scene.part(body).unwrap().origin, [0.0, 0.0, 0.0]);
        let cubes = scene.listed_children(body);
        assert_eq!(cubes.len(), 1);
        assert_eq!(scene.cube(cubes[0]).unwrap().size(), [4.0, 4.0, 4.0]);

        let recompiled = compile_scene(&scene, meta).expect("should compile");
        assert_eq!(recompiled, doc);
    }

    /// Root -> Child -> Cube keeps the child's absolute origin.
    #[test]
    fn test_offset_chain_round_trip() {
        let mut scene = Scene::new();
        let root = scene.add_part(Part::new("root"), None).unwrap();
        let child = scene
            .add_part(Part::new("child").with_origin([2.0, 3.0, -1.0]), Some(root))
            .unwrap();
        scene
            .add_cube(Cube::new([1.0, 2.0, -2.0], [3.0, 5.0, 0.0]), child)
            .unwrap();

        let doc = compile_scene(&scene, ProjectMeta::default()).unwrap();
        assert_eq!(doc.mesh["root"].part_pose, None);
        assert_eq!(doc.mesh["root"].children["child"].offset(), [-2.0, -3.0, -1.0]);

        let (loaded, _) = load_document(&doc).unwrap();
        let child = loaded.find_part("root/child").unwrap();
        assert!(adapter::approx_eq(
            loaded.part(child).unwrap().origin,
            [2.0, 3.0, -1.0],
            1e-9
        ));
        let cube = loaded.cube(loaded.listed_children(child)[0]).unwrap();
        assert_eq!(cube.from, [1.0, 2.0, -2.0]);
        assert_eq!(cube.to, [3.0, 5.0, 0.0]);
    }

    /// Sentinel names, mirror and deformation only appear when meaningful.
    #[test]
    fn test_omission_rules_in_json() {
        let mut scene = Scene::new();
        let body = scene.add_part(Part::new("body"), None).unwrap();
        scene
            .add_cube(Cube::new([0.0; 3], [1.0; 3]), body)
            .unwrap();
        scene
            .add_cube(
                Cube::new([0.0; 3], [1.0; 3])
                    .named("armor")
                    .with_inflate(2.0)
                    .with_mirror_uv(true),
                body,
            )
            .unwrap();

        let json = PalladiumCodec
            .compile(&scene, ProjectMeta::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let cubes = value["mesh"]["body"]["cubes"].as_array().unwrap();

        let plain = cubes[0].as_object().unwrap();
        assert!(!plain.contains_key("name"));
        assert!(!plain.contains_key("mirror"));
        assert!(!plain.contains_key("deformation"));

        assert_eq!(cubes[1]["name"], "armor");
        assert_eq!(cubes[1]["mirror"], true);
        assert_eq!(cubes[1]["deformation"], serde_json::json!([2, 2, 2]));
    }
}
