//! Formats command implementation
//!
//! Lists the registered model formats, their editor features, and the menu
//! entries each one adds when activated.

use anyhow::{Context, Result};
use colored::Colorize;
use palladium_model::{FormatRegistry, MenuBar, ModelFormat, PLUGIN};
use std::process::ExitCode;

use super::json_output::{FormatSummary, FormatsOutput};

/// Run the formats command
///
/// # Arguments
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: always 0
pub fn run(json_output: bool) -> Result<ExitCode> {
    let registry = FormatRegistry::with_defaults();
    let formats: Vec<FormatSummary> = registry.iter().map(summarize).collect();

    if json_output {
        let output = FormatsOutput {
            plugin: PLUGIN.id.to_string(),
            version: PLUGIN.version.to_string(),
            formats,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} {} by {}",
        "Plugin:".cyan().bold(),
        PLUGIN.title,
        PLUGIN.version,
        PLUGIN.author
    );
    for format in &formats {
        println!("  {} ({}) .{}", format.name.bold(), format.id, format.extension);
        println!("    {}", format.description.dimmed());
        println!("    features: {}", format.features.join(", "));
        for (menu, action) in &format.menu_entries {
            println!("    menu: {} -> {}", menu, action);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Describes a format, activating it against a scratch menu bar to collect
/// the entries it contributes.
pub fn summarize(format: &ModelFormat) -> FormatSummary {
    let mut menu = MenuBar::new();
    format.activate(&mut menu);
    let menu_entries = menu
        .entries()
        .iter()
        .map(|(path, action)| (path.clone(), action.id.clone()))
        .collect();
    format.deactivate(&mut menu);

    FormatSummary {
        id: format.id.to_string(),
        name: format.name.to_string(),
        description: format.description.to_string(),
        extension: format.codec().extension().to_string(),
        features: format
            .features
            .enabled()
            .into_iter()
            .map(str::to_string)
            .collect(),
        menu_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palladium_model::{CODEC_ID, EXPORT_MENU};

    #[test]
    fn test_summarize_palladium() {
        let summary = summarize(&ModelFormat::palladium());
        assert_eq!(summary.id, CODEC_ID);
        assert_eq!(summary.extension, "json");
        assert_eq!(
            summary.menu_entries,
            vec![(EXPORT_MENU.to_string(), "export_palladium_entity".to_string())]
        );
        assert!(summary.features.contains(&"box_uv".to_string()));
    }

    #[test]
    fn test_formats_runs() {
        assert_eq!(run(false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(true).unwrap(), ExitCode::SUCCESS);
    }
}
