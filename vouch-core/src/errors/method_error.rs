//! Per-method execution errors.

use super::error_code::{self, VouchErrorCode};

/// Errors raised by a single verification method.
///
/// Recovered locally by the engine: a failed method contributes zero
/// findings and is omitted from `methods_executed`.
#[derive(Debug, thiserror::Error)]
pub enum MethodError {
    #[error("Method '{method}' failed: {message}")]
    Failed { method: String, message: String },

    #[error("Method '{method}' timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },

    #[error("Method '{method}' cancelled")]
    Cancelled { method: String },
}

impl VouchErrorCode for MethodError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled { .. } => error_code::CANCELLED,
            _ => error_code::METHOD_ERROR,
        }
    }
}
