//! Multi-source finding aggregation into a single verdict.

use vouch_core::config::VerdictConfig;
use vouch_core::errors::ConfigError;
use vouch_core::types::collections::FxHashSet;
use vouch_core::types::{
    Decision, DomainConfidence, Finding, MethodId, Severity, Verdict,
};

use super::scoring::{self, DecisionBands, SeverityWeights};

/// Combines findings from all executed methods into a verdict.
///
/// Stateless between calls: every aggregation computes the score and
/// decision fresh from its inputs.
#[derive(Debug, Clone, Default)]
pub struct VerdictAggregator {
    weights: SeverityWeights,
    bands: DecisionBands,
}

impl VerdictAggregator {
    /// Aggregator with the default scoring policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator with an explicit, pre-validated policy.
    pub fn with_policy(
        weights: SeverityWeights,
        bands: DecisionBands,
    ) -> Result<Self, ConfigError> {
        scoring::validate(&weights, &bands)?;
        Ok(Self { weights, bands })
    }

    /// Aggregator from `[verdict]` config, validating the resolved policy.
    pub fn from_config(config: &VerdictConfig) -> Result<Self, ConfigError> {
        let (weights, bands) = scoring::resolve(config)?;
        Ok(Self { weights, bands })
    }

    /// Aggregate findings into a verdict.
    ///
    /// The findings list is re-ordered deterministically (severity
    /// descending, then method id, then finding id) and methods are
    /// reported ascending by id, so a fixed input always produces an
    /// identical verdict.
    pub fn aggregate(
        &self,
        mut findings: Vec<Finding>,
        domains_detected: Vec<DomainConfidence>,
        mut methods_executed: Vec<MethodId>,
    ) -> Verdict {
        findings.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.method_id.cmp(&b.method_id))
                .then_with(|| a.id.cmp(&b.id))
        });
        // A method re-reporting the same finding id must not inflate the score.
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        findings.retain(|f| seen.insert((f.method_id.as_str().to_string(), f.id.clone())));
        methods_executed.sort();
        methods_executed.dedup();

        let score: f64 = findings
            .iter()
            .map(|f| self.weights.weight_for(f.severity))
            .sum();
        let has_critical = findings.iter().any(|f| f.severity == Severity::Critical);

        let decision = if has_critical || score >= self.bands.reject {
            Decision::Reject
        } else if score >= self.bands.uncertain {
            Decision::Uncertain
        } else {
            Decision::Accept
        };

        let summary = self.summarize(decision, score, &findings);

        Verdict {
            decision,
            score,
            findings,
            domains_detected,
            methods_executed,
            summary,
        }
    }

    /// Deterministic summary from the decision and the top findings.
    /// Performs no additional reasoning.
    fn summarize(&self, decision: Decision, score: f64, findings: &[Finding]) -> String {
        if findings.is_empty() {
            return "Accepted: no findings.".to_string();
        }

        let critical = findings
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .count();
        let top: Vec<String> = findings
            .iter()
            .take(3)
            .map(|f| format!("[{}] {}", f.severity, f.title))
            .collect();

        let head = match decision {
            Decision::Accept => format!(
                "Accepted: {} low-severity finding(s) (score {score:.1})",
                findings.len()
            ),
            Decision::Uncertain => format!(
                "Uncertain: {} finding(s) (score {score:.1}) warrant review",
                findings.len()
            ),
            Decision::Reject => {
                if critical > 0 {
                    format!(
                        "Rejected: {critical} critical finding(s) among {} (score {score:.1})",
                        findings.len()
                    )
                } else {
                    format!(
                        "Rejected: score {score:.1} from {} finding(s)",
                        findings.len()
                    )
                }
            }
        };

        format!("{head}. Top findings: {}.", top.join("; "))
    }
}
