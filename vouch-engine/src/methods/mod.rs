//! Verification methods — named procedures that contribute findings.
//!
//! One method is deterministic and owned here (`PatternMatchMethod`); the
//! reasoning-backed methods are external collaborators wrapped behind the
//! `ReasoningProvider` seam. The engine treats every method uniformly
//! through the `VerificationMethod` trait.

pub mod pattern_match;
pub mod reasoning;
pub mod registry;

use vouch_core::errors::MethodError;
use vouch_core::traits::CancellationToken;
use vouch_core::types::{DomainDetectionResult, Finding};

pub use pattern_match::PatternMatchMethod;
pub use reasoning::{ReasoningMethod, ReasoningProvider, ReasoningRequest};
pub use registry::MethodRegistry;

/// Well-known method identifiers.
pub mod ids {
    /// The deterministic library-pattern method.
    pub const PATTERN_MATCH: &str = "pattern-match";
    // Reasoning-backed methods, provided externally.
    pub const BOUNDARY_ANALYSIS: &str = "boundary-analysis";
    pub const ASSUMPTION_SURFACING: &str = "assumption-surfacing";
    pub const TEMPORAL_CONSISTENCY: &str = "temporal-consistency";
    pub const ADVERSARIAL_REVIEW: &str = "adversarial-review";
    pub const DOMAIN_EXPERT_REVIEW: &str = "domain-expert-review";
    pub const INTEGRATION_ANALYSIS: &str = "integration-analysis";
    pub const WORST_CASE_ANALYSIS: &str = "worst-case-analysis";
}

/// Per-call context handed to every method.
#[derive(Debug, Clone)]
pub struct MethodContext {
    pub file_path: Option<String>,
    pub language: Option<String>,
    /// Cooperative cancellation; fired when the run's deadline passes.
    pub cancel: CancellationToken,
}

impl MethodContext {
    pub fn new(file_path: Option<String>, language: Option<String>) -> Self {
        Self {
            file_path,
            language,
            cancel: CancellationToken::new(),
        }
    }
}

/// A named verification procedure.
///
/// Methods are independent of one another and may run concurrently; each
/// finding they produce must carry the method's own id so the verdict can
/// report `methods_executed` truthfully.
pub trait VerificationMethod: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Produce findings for the artifact, or fail. A failed method
    /// contributes zero findings; it never aborts the overall run.
    fn execute(
        &self,
        artifact_text: &str,
        detection: &DomainDetectionResult,
        ctx: &MethodContext,
    ) -> Result<Vec<Finding>, MethodError>;
}
