//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `inspect`, `verify`, and `formats`.

use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// Format: CLI_XXX for CLI-level errors; model errors pass through their
/// PEM_XXX codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_003";
    /// Compiled output differs from the input model
    pub const ROUND_TRIP_MISMATCH: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "PEM_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the field path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the source file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Converts an input error, keeping its stable code.
    pub fn from_input(err: &InputError, file: &str) -> Self {
        Self::new(err.code(), err.to_string()).with_file(file)
    }
}

/// One part in the `inspect` tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartSummary {
    /// Slash-separated path from the top-level part (e.g., "body/head")
    pub path: String,
    /// Pivot relative to the parent part, as stored in the file
    pub offset: [f64; 3],
    /// Pivot in editor coordinates, accumulated from the root
    pub origin: [f64; 3],
    /// Rotation in degrees, as stored in the file
    pub rotation: [f64; 3],
    /// Number of cubes directly on this part
    pub cubes: usize,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    pub success: bool,
    pub file: String,
    /// Id of the format that parsed the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_height: Option<u32>,
    pub parts: Vec<PartSummary>,
    pub cube_count: usize,
    pub errors: Vec<JsonError>,
}

impl InspectOutput {
    /// Creates a failed inspect result.
    pub fn failure(file: impl Into<String>, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            file: file.into(),
            format: None,
            source_hash: None,
            texture_width: None,
            texture_height: None,
            parts: Vec::new(),
            cube_count: 0,
            errors,
        }
    }
}

/// Output of `verify --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyOutput {
    pub success: bool,
    pub file: String,
    pub tolerance: f64,
    pub errors: Vec<JsonError>,
}

/// One registered format in `formats --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub extension: String,
    pub features: Vec<String>,
    /// `(menu path, action id)` entries added on activation
    pub menu_entries: Vec<(String, String)>,
}

/// Output of `formats --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatsOutput {
    pub plugin: String,
    pub version: String,
    pub formats: Vec<FormatSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_skips_empty_fields() {
        let err = JsonError::new(error_codes::FILE_READ, "boom");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"CLI_001","message":"boom"}"#);
    }

    #[test]
    fn test_json_error_builders() {
        let err = JsonError::new(error_codes::ROUND_TRIP_MISMATCH, "differs")
            .with_path("mesh.body")
            .with_file("model.json");
        assert_eq!(err.path.as_deref(), Some("mesh.body"));
        assert_eq!(err.file.as_deref(), Some("model.json"));
    }
}
