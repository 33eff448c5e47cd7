//! Text codec for the Palladium entity model format.
//!
//! A codec turns a scene graph into file text and back. File I/O stays with
//! the caller; a codec only ever sees strings.

use tracing::debug;

use crate::compile::compile_scene;
use crate::error::ModelResult;
use crate::interchange::ModelDocument;
use crate::load::load_into;
use crate::scene::{ProjectMeta, Scene};

/// Codec id of the Palladium entity model format.
pub const CODEC_ID: &str = "palladium_entity_model";

/// Extension used when saving Palladium entity models.
pub const FILE_EXTENSION: &str = "json";

/// A named load/save format.
pub trait Codec: std::fmt::Debug {
    /// Stable codec id.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Extension written on export, without the dot.
    fn extension(&self) -> &'static str;

    /// Extensions accepted on import, without the dot.
    fn load_extensions(&self) -> &'static [&'static str] {
        &[]
    }

    /// Compiles a scene into file text.
    fn compile(&self, scene: &Scene, meta: ProjectMeta) -> ModelResult<String>;

    /// Parses file text into an interchange document without building a scene.
    fn parse(&self, text: &str) -> ModelResult<ModelDocument>;

    /// Loads file text into `scene`, returning the file's project metadata.
    fn load_into(&self, scene: &mut Scene, text: &str) -> ModelResult<ProjectMeta> {
        let doc = self.parse(text)?;
        load_into(scene, &doc)
    }

    /// Loads file text into a fresh scene.
    fn load(&self, text: &str) -> ModelResult<(Scene, ProjectMeta)> {
        let mut scene = Scene::new();
        let meta = self.load_into(&mut scene, text)?;
        Ok((scene, meta))
    }

    /// Returns true if a file with this extension can be loaded.
    fn accepts_extension(&self, extension: &str) -> bool {
        self.load_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Codec for the Palladium entity model JSON format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PalladiumCodec;

impl Codec for PalladiumCodec {
    fn id(&self) -> &'static str {
        CODEC_ID
    }

    fn name(&self) -> &'static str {
        "Palladium Entity Model"
    }

    fn extension(&self) -> &'static str {
        FILE_EXTENSION
    }

    fn load_extensions(&self) -> &'static [&'static str] {
        &[FILE_EXTENSION]
    }

    fn compile(&self, scene: &Scene, meta: ProjectMeta) -> ModelResult<String> {
        let doc = compile_scene(scene, meta)?;
        debug!(parts = doc.part_count(), cubes = doc.cube_count(), "compiled scene");
        doc.to_json_pretty()
    }

    fn parse(&self, text: &str) -> ModelResult<ModelDocument> {
        ModelDocument::from_json(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::scene::{Cube, Part};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_then_load() {
        let mut scene = Scene::new();
        let body = scene
            .add_part(Part::new("body").with_origin([0.0, 24.0, 0.0]), None)
            .unwrap();
        scene
            .add_cube(Cube::new([-4.0, 12.0, -2.0], [4.0, 24.0, 2.0]), body)
            .unwrap();

        let codec = PalladiumCodec;
        let text = codec.compile(&scene, ProjectMeta::new(64, 64)).unwrap();
        let (loaded, meta) = codec.load(&text).unwrap();

        assert_eq!(meta, ProjectMeta::new(64, 64));
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_load_reports_missing_metadata() {
        let err = PalladiumCodec.load(r#"{"mesh": {}}"#).unwrap_err();
        assert!(matches!(
            err,
            ModelError::MissingField {
                field: "texture_width"
            }
        ));
    }

    #[test]
    fn test_compile_refuses_unreadable_output() {
        let mut scene = Scene::new();
        let body = scene.add_part(Part::new("body"), None).unwrap();
        scene
            .add_cube(Cube::new([-1e308, 0.0, 0.0], [1e308, 1.0, 1.0]), body)
            .unwrap();

        let err = PalladiumCodec
            .compile(&scene, ProjectMeta::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidField { ref field, .. } if field == "mesh.body.cubes[0].dimensions[0]"
        ));
    }

    #[test]
    fn test_deep_chain_round_trips_through_text() {
        let mut scene = Scene::new();
        let mut parent = None;
        for i in 0..crate::interchange::MAX_PART_DEPTH {
            let link = Part::new(format!("link{}", i)).with_origin([0.0, i as f64, 0.0]);
            let id = scene.add_part(link, parent).unwrap();
            parent = Some(id);
        }

        let codec = PalladiumCodec;
        let text = codec.compile(&scene, ProjectMeta::default()).unwrap();
        let (loaded, _) = codec.load(&text).unwrap();
        assert_eq!(loaded, scene);

        scene.add_part(Part::new("one_too_many"), parent).unwrap();
        assert_eq!(
            codec.compile(&scene, ProjectMeta::default()).unwrap_err().code(),
            "PEM_003"
        );
    }

    #[test]
    fn test_extensions() {
        let codec = PalladiumCodec;
        assert_eq!(codec.extension(), "json");
        assert!(codec.accepts_extension("JSON"));
        assert!(!codec.accepts_extension("bbmodel"));
    }
}
