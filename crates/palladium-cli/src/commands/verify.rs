//! Verify command implementation
//!
//! Loads a model into a scene, compiles it back, and reports every structural
//! difference between the input and the recompiled document.

use anyhow::{Context, Result};
use colored::Colorize;
use palladium_model::{compile_scene, diff_documents, load_document, Difference, ModelDocument};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, VerifyOutput};
use crate::input::load_model;

/// Run the verify command
///
/// # Arguments
/// * `model_path` - Path to the model file (.json)
/// * `tolerance` - Maximum per-component difference for vectors
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the model round-trips, 1 otherwise
pub fn run(model_path: &str, tolerance: f64, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(model_path, tolerance)
    } else {
        run_human(model_path, tolerance)
    }
}

/// Loads `doc`, recompiles it, and diffs the result against `doc`.
pub fn round_trip(doc: &ModelDocument, tolerance: f64) -> Result<Vec<Difference>> {
    let (scene, meta) = load_document(doc).context("Failed to load model into a scene")?;
    let recompiled = compile_scene(&scene, meta).context("Failed to recompile the model")?;
    Ok(diff_documents(doc, &recompiled, tolerance))
}

fn run_human(model_path: &str, tolerance: f64) -> Result<ExitCode> {
    println!("{} {}", "Verifying:".cyan().bold(), model_path);

    let loaded = load_model(Path::new(model_path))?;
    let differences = round_trip(&loaded.document, tolerance)?;

    if differences.is_empty() {
        println!(
            "{} Model round-trips within {}",
            "SUCCESS".green().bold(),
            tolerance
        );
        return Ok(ExitCode::SUCCESS);
    }

    for difference in &differences {
        println!("  {} {}", "-".red(), difference);
    }
    println!(
        "{} {} difference(s) after round trip",
        "FAILED".red().bold(),
        differences.len()
    );
    Ok(ExitCode::from(1))
}

fn run_json(model_path: &str, tolerance: f64) -> Result<ExitCode> {
    let errors = match load_model(Path::new(model_path)) {
        Ok(loaded) => match round_trip(&loaded.document, tolerance) {
            Ok(differences) => differences
                .into_iter()
                .map(|d| {
                    JsonError::new(error_codes::ROUND_TRIP_MISMATCH, d.message)
                        .with_path(d.path)
                        .with_file(model_path)
                })
                .collect(),
            Err(e) => vec![JsonError::new(error_codes::ROUND_TRIP_MISMATCH, format!("{:#}", e))
                .with_file(model_path)],
        },
        Err(e) => vec![JsonError::from_input(&e, model_path)],
    };

    let output = VerifyOutput {
        success: errors.is_empty(),
        file: model_path.to_string(),
        tolerance,
        errors,
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use palladium_model::DEFAULT_TOLERANCE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_of_clean_model() {
        let doc = ModelDocument::from_json(
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {
                "part_pose": {"offset": [0, -24, 0], "rotation": [0, 0, 5]},
                "cubes": [{"origin": [-4, 0, -2], "dimensions": [8, 12, 4], "texture_offset": [16, 16], "mirror": true}]
            }}}"#,
        )
        .unwrap();
        assert!(round_trip(&doc, DEFAULT_TOLERANCE).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_reports_non_uniform_deformation() {
        let doc = ModelDocument::from_json(
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {
                "cubes": [{"origin": [0, 0, 0], "dimensions": [1, 1, 1], "texture_offset": [0, 0], "deformation": [1, 2, 3]}]
            }}}"#,
        )
        .unwrap();
        let differences = round_trip(&doc, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path, "mesh.body.cubes[0].deformation");
    }

    #[test]
    fn test_verify_exit_codes() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        fs::write(
            &good,
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {"cubes": []}}}"#,
        )
        .unwrap();
        assert_eq!(
            run(good.to_str().unwrap(), DEFAULT_TOLERANCE, false).unwrap(),
            ExitCode::SUCCESS
        );

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"texture_width": 64, "mesh": {}}"#).unwrap();
        assert_eq!(
            run(bad.to_str().unwrap(), DEFAULT_TOLERANCE, true).unwrap(),
            ExitCode::from(1)
        );
        assert!(run(bad.to_str().unwrap(), DEFAULT_TOLERANCE, false).is_err());
    }
}
