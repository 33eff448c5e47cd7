//! Load command implementation
//!
//! Loads a Palladium entity model file and writes the resulting scene as a
//! snapshot.

use anyhow::{Context, Result};
use colored::Colorize;
use palladium_model::{load_document, SceneSnapshot};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::write_output;
use crate::input::load_model;

/// Run the load command
///
/// # Arguments
/// * `model_path` - Path to the model file (.json)
/// * `output` - Output snapshot path (default: stdout)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(model_path: &str, output: Option<&str>) -> Result<ExitCode> {
    let loaded = load_model(Path::new(model_path))?;
    debug!(source_hash = %loaded.source_hash, "loaded model");

    let (scene, meta) = load_document(&loaded.document)
        .with_context(|| format!("Failed to load model: {}", model_path))?;
    let text = SceneSnapshot::capture(&scene, meta)
        .to_json_pretty()
        .context("Failed to serialize scene snapshot")?;

    write_output(output, &text)?;

    if let Some(path) = output {
        println!(
            "{} {} -> {} ({} nodes)",
            "SUCCESS".green().bold(),
            model_path,
            path,
            scene.len()
        );
    }

    Ok(ExitCode::SUCCESS)
}
