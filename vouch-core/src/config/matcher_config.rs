//! Pattern-matcher configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the confidence-weighted pattern matcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum confidence for a pattern to enter the result set.
    /// `1.0` means "all signals required". Default 0.6.
    pub confidence_threshold: Option<f32>,
}
