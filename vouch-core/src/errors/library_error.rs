//! Pattern-library load and lookup errors.

use super::error_code::{self, VouchErrorCode};

/// Errors raised while loading or querying the pattern library.
///
/// Load-time variants always name the offending pattern id, or its index
/// within the source when no valid id exists yet.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Failed to read rule source {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse rule source {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Pattern at index {index} in {path} is missing required field '{field}'")]
    MissingField {
        path: String,
        index: usize,
        field: &'static str,
    },

    #[error("Invalid pattern id '{id}' in {path} (expected e.g. CC-001)")]
    InvalidId { path: String, id: String },

    #[error("Unknown domain '{domain}' in pattern '{id}'")]
    UnknownDomain { id: String, domain: String },

    #[error("Unknown severity '{severity}' in pattern '{id}'")]
    UnknownSeverity { id: String, severity: String },

    #[error("Invalid regex in pattern '{id}': {message}")]
    InvalidRegex { id: String, message: String },

    #[error("Negative signal weight {weight} in pattern '{id}'")]
    NegativeWeight { id: String, weight: f32 },

    #[error("Pattern '{id}' not found in library")]
    PatternNotFound { id: String },
}

impl VouchErrorCode for LibraryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PatternNotFound { .. } => error_code::PATTERN_NOT_FOUND,
            _ => error_code::LIBRARY_ERROR,
        }
    }
}
