//! Domain classification errors.

use super::error_code::{self, VouchErrorCode};

/// Errors raised by a domain classifier.
///
/// Classification is advisory, so the engine recovers from these; they are
/// still typed so external classifiers can report what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Classifier provider failed: {0}")]
    Provider(String),

    #[error("Classification timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl VouchErrorCode for ClassifyError {
    fn error_code(&self) -> &'static str {
        error_code::CLASSIFY_ERROR
    }
}
