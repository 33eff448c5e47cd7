//! Input helpers for loading interchange models and scene snapshots.
//!
//! Model files are dispatched by extension through the format registry and
//! returned with source provenance (a BLAKE3 hash of the file content).

use palladium_model::{
    FormatRegistry, ModelDocument, ModelError, ProjectMeta, Scene, SceneSnapshot,
};
use tracing::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::json_output::error_codes;

/// Errors that can occur while loading input files.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No registered format loads this extension.
    UnknownExtension { extension: Option<String> },

    /// The file was read but is not a valid model or snapshot.
    Model { path: PathBuf, source: ModelError },
}

impl InputError {
    /// Stable error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
            InputError::Model { source, .. } => source.code(),
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::Model { path, source } => {
                write!(f, "invalid model '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Model { source, .. } => Some(source),
            InputError::UnknownExtension { .. } => None,
        }
    }
}

/// A parsed interchange model.
#[derive(Debug)]
pub struct LoadedModel {
    /// The parsed document.
    pub document: ModelDocument,
    /// Id of the format that parsed the file.
    pub format: &'static str,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// A restored scene snapshot.
#[derive(Debug)]
pub struct LoadedScene {
    /// The scene graph.
    pub scene: Scene,
    /// Project metadata stored with the snapshot.
    pub meta: ProjectMeta,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

fn read(path: &Path) -> Result<(String, String), InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    Ok((content, hash))
}

/// Loads an interchange model file.
///
/// # Arguments
/// * `path` - Path to the model file (.json)
///
/// # Returns
/// * `Ok(LoadedModel)` - Successfully parsed model
/// * `Err(InputError)` - Read, extension, or model error
pub fn load_model(path: &Path) -> Result<LoadedModel, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    let registry = FormatRegistry::with_defaults();
    let Some(format) = extension
        .as_deref()
        .and_then(|ext| registry.for_extension(ext).ok())
    else {
        return Err(InputError::UnknownExtension { extension });
    };

    let (content, source_hash) = read(path)?;
    debug!(format = format.id, path = %path.display(), "parsing model");
    let document = format
        .codec()
        .parse(&content)
        .map_err(|source| InputError::Model {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(LoadedModel {
        document,
        format: format.id,
        source_hash,
    })
}

/// Loads a scene snapshot file.
pub fn load_scene(path: &Path) -> Result<LoadedScene, InputError> {
    let (content, source_hash) = read(path)?;
    let to_model_error = |source| InputError::Model {
        path: path.to_path_buf(),
        source,
    };
    let snapshot = SceneSnapshot::from_json(&content).map_err(to_model_error)?;
    let (scene, meta) = snapshot.restore().map_err(to_model_error)?;

    Ok(LoadedScene {
        scene,
        meta,
        source_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_model_rejects_unknown_extension() {
        let err = load_model(Path::new("model.bbmodel")).unwrap_err();
        assert_eq!(err.code(), "CLI_002");
        assert!(err.to_string().contains(".bbmodel"));
    }

    #[test]
    fn test_load_model_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_model(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), "CLI_001");
    }

    #[test]
    fn test_load_model_reports_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"texture_width": 64, "mesh": {}}"#).unwrap();
        let err = load_model(&path).unwrap_err();
        assert_eq!(err.code(), "PEM_002");
        assert!(err.to_string().contains("texture_height"));
    }

    #[test]
    fn test_load_model_hashes_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(
            &path,
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {}}"#,
        )
        .unwrap();
        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.source_hash.len(), 64);
        assert!(loaded.document.mesh.is_empty());
    }

    #[test]
    fn test_load_model_dispatches_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MODEL.JSON");
        fs::write(
            &path,
            r#"{"texture_width": 16, "texture_height": 16, "mesh": {"body": {"cubes": []}}}"#,
        )
        .unwrap();
        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.format, palladium_model::CODEC_ID);
        assert_eq!(loaded.document.part_count(), 1);
    }
}
