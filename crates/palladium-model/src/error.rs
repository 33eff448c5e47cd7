//! Error types for model loading, compiling, and format registration.

use thiserror::Error;

/// Top-level error type for model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required top-level field is absent from an interchange document.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// A field is present but has the wrong shape, or a scene snapshot
    /// references a node that does not exist.
    #[error("invalid field `{field}`: {message}")]
    InvalidField {
        /// JSON path of the offending field (e.g., "nodes\[3\].parent").
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Creates an invalid-field error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ModelError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code string (e.g., "PEM_001").
    ///
    /// These codes are stable and can be used for programmatic error handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Json(_) => "PEM_001",
            ModelError::MissingField { .. } => "PEM_002",
            ModelError::InvalidField { .. } => "PEM_003",
            ModelError::Io(_) => "PEM_004",
        }
    }
}

/// Errors that can occur while registering or resolving model formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A format with this id is already registered.
    #[error("format already registered: {0}")]
    AlreadyRegistered(String),

    /// Another format already claims this file extension for saving.
    #[error("extension '{extension}' already claimed by format '{existing}'")]
    ExtensionConflict {
        /// The contested extension.
        extension: String,
        /// Id of the format that registered it first.
        existing: String,
    },

    /// No format matches the requested id or extension.
    #[error("format not found: {0}")]
    NotFound(String),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            ModelError::MissingField { field: "mesh" },
            ModelError::invalid("mesh", "expected object"),
            ModelError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        ];
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["PEM_002", "PEM_003", "PEM_004"]);
    }

    #[test]
    fn test_missing_field_message() {
        let err = ModelError::MissingField {
            field: "texture_width",
        };
        assert_eq!(err.to_string(), "missing required field `texture_width`");
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::ExtensionConflict {
            extension: "json".to_string(),
            existing: "bedrock".to_string(),
        };
        assert!(err.to_string().contains("bedrock"));
    }
}
