//! Verdict-scoring configuration.

use serde::{Deserialize, Serialize};

/// Severity weights and decision thresholds for the verdict aggregator.
///
/// Unset fields fall back to the named defaults in the engine's `scoring`
/// module. The aggregator validates the resolved values: weights monotonic
/// in severity, critical weight at or above the reject threshold, and
/// `reject > uncertain >= 0`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerdictConfig {
    pub critical_weight: Option<f64>,
    pub error_weight: Option<f64>,
    pub warning_weight: Option<f64>,
    pub info_weight: Option<f64>,
    /// Score at or above which the decision is REJECT.
    pub reject_threshold: Option<f64>,
    /// Score at or above which the decision is UNCERTAIN.
    pub uncertain_threshold: Option<f64>,
}
