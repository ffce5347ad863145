//! Engine-level verification errors.
//! Aggregates subsystem errors via `From` conversions.

use crate::types::Verdict;

use super::error_code::{self, VouchErrorCode};
use super::{ClassifyError, ConfigError, LibraryError};

/// Errors that fail a whole `verify()` call.
///
/// Per-method failures are not represented here; the engine recovers from
/// those and reports them only through a smaller `methods_executed` list.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No verification methods enabled")]
    NoMethodsEnabled,

    #[error("All {attempted} verification method(s) failed")]
    AllMethodsFailed { attempted: usize },

    /// The overall call exceeded its budget. `partial` carries the verdict
    /// aggregated from methods that had already completed, if any did.
    #[error("Verification timed out after {timeout_ms}ms")]
    Timeout {
        timeout_ms: u64,
        partial: Option<Box<Verdict>>,
    },

    #[error("Verification cancelled")]
    Cancelled,
}

impl VouchErrorCode for VerifyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Library(e) => e.error_code(),
            Self::Classify(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Timeout { .. } => error_code::TIMEOUT,
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::VERIFY_ERROR,
        }
    }
}
