//! Inspect command implementation
//!
//! Prints the part tree of a Palladium entity model: relative offsets as
//! stored, absolute pivots in editor coordinates, and cube counts.

use anyhow::{Context, Result};
use colored::Colorize;
use palladium_model::adapter::add;
use palladium_model::{flip_position, InterchangePart, ModelDocument, Vec3, ZERO};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{InspectOutput, JsonError, PartSummary};
use crate::input::{load_model, LoadedModel};

/// Run the inspect command
///
/// # Arguments
/// * `model_path` - Path to the model file (.json)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(model_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(model_path)
    } else {
        run_human(model_path)
    }
}

/// Flattens the part tree depth-first, parents before children.
pub fn summarize(doc: &ModelDocument) -> Vec<PartSummary> {
    let mut parts = Vec::new();
    for (name, part) in &doc.mesh {
        collect(name.clone(), part, ZERO, &mut parts);
    }
    parts
}

fn collect(path: String, part: &InterchangePart, parent_origin: Vec3, out: &mut Vec<PartSummary>) {
    let offset = part.offset();
    let origin = add(parent_origin, offset);
    out.push(PartSummary {
        path: path.clone(),
        offset,
        origin: flip_position(origin),
        rotation: part.rotation(),
        cubes: part.cubes.len(),
    });
    for (name, child) in &part.children {
        collect(format!("{}/{}", path, name), child, origin, out);
    }
}

/// Run inspect with human-readable (colored) output
fn run_human(model_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting model:".cyan().bold(), model_path);

    let LoadedModel {
        document,
        format,
        source_hash,
    } = load_model(Path::new(model_path))?;

    println!("  {} {}", "Format:".dimmed(), format);
    println!("  {} {}", "Source hash:".dimmed(), source_hash);
    println!(
        "  {} {}x{}",
        "Texture:".dimmed(),
        document.texture_width,
        document.texture_height
    );

    let parts = summarize(&document);
    if parts.is_empty() {
        println!("  {}", "(no parts)".yellow());
    }
    for part in &parts {
        let depth = part.path.matches('/').count();
        let name = part.path.rsplit('/').next().unwrap_or(&part.path);
        println!(
            "  {}{} offset={:?} pivot={:?} rotation={:?} cubes={}",
            "  ".repeat(depth),
            name.bold(),
            part.offset,
            part.origin,
            part.rotation,
            part.cubes
        );
    }

    println!(
        "{} {} parts, {} cubes",
        "SUCCESS".green().bold(),
        document.part_count(),
        document.cube_count()
    );

    Ok(ExitCode::SUCCESS)
}

/// Run inspect with machine-readable JSON output
fn run_json(model_path: &str) -> Result<ExitCode> {
    let output = match load_model(Path::new(model_path)) {
        Ok(LoadedModel {
            document,
            format,
            source_hash,
        }) => InspectOutput {
            success: true,
            file: model_path.to_string(),
            format: Some(format.to_string()),
            source_hash: Some(source_hash),
            texture_width: Some(document.texture_width),
            texture_height: Some(document.texture_height),
            parts: summarize(&document),
            cube_count: document.cube_count(),
            errors: Vec::new(),
        },
        Err(e) => InspectOutput::failure(model_path, vec![JsonError::from_input(&e, model_path)]),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
