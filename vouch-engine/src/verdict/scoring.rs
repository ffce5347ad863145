//! Scoring policy: per-severity weights and decision thresholds.
//!
//! The exact numbers are calibration points, exposed through `[verdict]`
//! config rather than hard-coded at use sites. Whatever values are chosen
//! must keep the scoring function monotonic in severity and keep a single
//! critical finding above the reject threshold.

use vouch_core::config::VerdictConfig;
use vouch_core::errors::ConfigError;
use vouch_core::types::Severity;

pub const DEFAULT_CRITICAL_WEIGHT: f64 = 10.0;
pub const DEFAULT_ERROR_WEIGHT: f64 = 3.0;
pub const DEFAULT_WARNING_WEIGHT: f64 = 0.5;
pub const DEFAULT_INFO_WEIGHT: f64 = 0.0;

/// Score at or above which the decision is REJECT.
pub const DEFAULT_REJECT_THRESHOLD: f64 = 8.0;
/// Score at or above which the decision is UNCERTAIN.
pub const DEFAULT_UNCERTAIN_THRESHOLD: f64 = 2.0;

/// Per-severity score contributions.
#[derive(Debug, Clone, Copy)]
pub struct SeverityWeights {
    pub critical: f64,
    pub error: f64,
    pub warning: f64,
    pub info: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: DEFAULT_CRITICAL_WEIGHT,
            error: DEFAULT_ERROR_WEIGHT,
            warning: DEFAULT_WARNING_WEIGHT,
            info: DEFAULT_INFO_WEIGHT,
        }
    }
}

impl SeverityWeights {
    pub fn weight_for(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

/// The two score thresholds separating the three decision bands.
#[derive(Debug, Clone, Copy)]
pub struct DecisionBands {
    pub reject: f64,
    pub uncertain: f64,
}

impl Default for DecisionBands {
    fn default() -> Self {
        Self {
            reject: DEFAULT_REJECT_THRESHOLD,
            uncertain: DEFAULT_UNCERTAIN_THRESHOLD,
        }
    }
}

/// Resolve weights and bands from config, falling back to the defaults,
/// and validate the policy invariants.
pub fn resolve(config: &VerdictConfig) -> Result<(SeverityWeights, DecisionBands), ConfigError> {
    let weights = SeverityWeights {
        critical: config.critical_weight.unwrap_or(DEFAULT_CRITICAL_WEIGHT),
        error: config.error_weight.unwrap_or(DEFAULT_ERROR_WEIGHT),
        warning: config.warning_weight.unwrap_or(DEFAULT_WARNING_WEIGHT),
        info: config.info_weight.unwrap_or(DEFAULT_INFO_WEIGHT),
    };
    let bands = DecisionBands {
        reject: config.reject_threshold.unwrap_or(DEFAULT_REJECT_THRESHOLD),
        uncertain: config
            .uncertain_threshold
            .unwrap_or(DEFAULT_UNCERTAIN_THRESHOLD),
    };
    validate(&weights, &bands)?;
    Ok((weights, bands))
}

/// Policy invariants: monotonic weights, critical dominance, ordered bands.
pub fn validate(weights: &SeverityWeights, bands: &DecisionBands) -> Result<(), ConfigError> {
    let monotonic = weights.critical >= weights.error
        && weights.error >= weights.warning
        && weights.warning >= weights.info
        && weights.info >= 0.0;
    if !monotonic {
        return Err(ConfigError::ValidationFailed {
            field: "verdict".to_string(),
            message: "severity weights must be monotonic and non-negative".to_string(),
        });
    }
    if weights.critical < bands.reject {
        return Err(ConfigError::ValidationFailed {
            field: "verdict.critical_weight".to_string(),
            message: "a single critical finding must reach the reject threshold".to_string(),
        });
    }
    if bands.reject <= bands.uncertain || bands.uncertain < 0.0 {
        return Err(ConfigError::ValidationFailed {
            field: "verdict.reject_threshold".to_string(),
            message: "thresholds must satisfy reject > uncertain >= 0".to_string(),
        });
    }
    Ok(())
}
