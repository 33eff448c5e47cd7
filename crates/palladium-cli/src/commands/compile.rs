//! Compile command implementation
//!
//! Compiles a scene snapshot into a Palladium entity model file.

use anyhow::{Context, Result};
use colored::Colorize;
use palladium_model::{FormatRegistry, CODEC_ID};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::write_output;
use crate::input::load_scene;

/// Run the compile command
///
/// # Arguments
/// * `scene_path` - Path to the scene snapshot JSON file
/// * `output` - Output model path (default: stdout)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(scene_path: &str, output: Option<&str>) -> Result<ExitCode> {
    let loaded = load_scene(Path::new(scene_path))?;
    debug!(
        nodes = loaded.scene.len(),
        source_hash = %loaded.source_hash,
        "loaded scene snapshot"
    );

    let registry = FormatRegistry::with_defaults();
    let format = registry.get(CODEC_ID)?;
    let text = format
        .codec()
        .compile(&loaded.scene, loaded.meta)
        .with_context(|| format!("Failed to compile scene: {}", scene_path))?;

    write_output(output, &text)?;

    if let Some(path) = output {
        println!(
            "{} {} -> {}",
            "SUCCESS".green().bold(),
            scene_path,
            path
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palladium_model::{Cube, ModelDocument, Part, ProjectMeta, Scene, SceneSnapshot};
    use std::fs;
    use tempfile::TempDir;

    fn write_snapshot(dir: &TempDir) -> String {
        let mut scene = Scene::new();
        let body = scene
            .add_part(Part::new("body").with_origin([0.0, 24.0, 0.0]), None)
            .unwrap();
        scene
            .add_cube(Cube::new([-4.0, 12.0, -2.0], [4.0, 24.0, 2.0]), body)
            .unwrap();
        let snapshot = SceneSnapshot::capture(&scene, ProjectMeta::new(64, 64));

        let path = dir.path().join("scene.json");
        fs::write(&path, snapshot.to_json_pretty().unwrap()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_compile_writes_model() {
        let dir = TempDir::new().unwrap();
        let scene_path = write_snapshot(&dir);
        let out_path = dir.path().join("model.json");

        let code = run(&scene_path, Some(out_path.to_str().unwrap())).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let doc = ModelDocument::from_json(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(doc.texture_height, 64);
        assert_eq!(doc.mesh["body"].offset(), [0.0, -24.0, 0.0]);
        assert_eq!(doc.mesh["body"].cubes[0].dimensions, [8.0, 12.0, 4.0]);
    }

    #[test]
    fn test_compile_missing_scene_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(run(missing.to_str().unwrap(), None).is_err());
    }
}
