//! The final verdict of a verification run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::DomainConfidence;
use super::finding::{Finding, MethodId};

/// Terminal decision of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Accept,
    Reject,
    Uncertain,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
            Self::Uncertain => "UNCERTAIN",
        };
        f.write_str(s)
    }
}

/// Aggregated outcome of a verification run: the decision, its score, and
/// the findings and detection results that support it.
///
/// Owned exclusively by the caller of the run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    /// Severity-weighted aggregate score over all findings.
    pub score: f64,
    /// All findings, ordered severity-descending, then by method id, then
    /// by finding id.
    pub findings: Vec<Finding>,
    pub domains_detected: Vec<DomainConfidence>,
    /// Methods that ran to completion, ascending by id.
    pub methods_executed: Vec<MethodId>,
    /// Deterministic one-paragraph description of the outcome.
    pub summary: String,
}

impl Verdict {
    /// Count findings at exactly the given severity.
    pub fn count_at(&self, severity: super::severity::Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}
