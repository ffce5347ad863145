//! The deterministic pattern-match method.

use std::sync::Arc;

use tracing::debug;

use vouch_core::errors::MethodError;
use vouch_core::types::{DomainDetectionResult, Evidence, Finding, MethodId};

use crate::library::PatternLibrary;
use crate::matcher::{MatchResult, PatternMatcher, DEFAULT_CONFIDENCE_THRESHOLD};

use super::{ids, MethodContext, VerificationMethod};

/// Matches the shared pattern library against the artifact and converts
/// each above-threshold match into a finding.
///
/// The only method whose output is fully deterministic: no I/O, no model
/// calls, no suspension.
pub struct PatternMatchMethod {
    library: Arc<PatternLibrary>,
    threshold: f32,
}

impl PatternMatchMethod {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self::with_threshold(library, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    pub fn with_threshold(library: Arc<PatternLibrary>, threshold: f32) -> Self {
        Self { library, threshold }
    }

    fn finding_from_match(&self, result: &MatchResult<'_>) -> Finding {
        let pattern = result.pattern;
        let title = pattern
            .description
            .clone()
            .unwrap_or_else(|| format!("Known problem signature {}", pattern.id));

        let mut description = format!(
            "Matched {}/{} signals of pattern {} (confidence {:.2})",
            result.matched_signals.len(),
            pattern.signals.len(),
            pattern.id,
            result.confidence,
        );
        if let Some(ref remediation) = pattern.remediation {
            description.push_str(". Remediation: ");
            description.push_str(remediation);
        }

        let evidence = result
            .matched_signals
            .iter()
            .map(|m| Evidence {
                quote: m.matched_text.clone(),
                line_number: Some(m.line_number),
                source: m.signal.label(),
                confidence: Some(result.confidence),
            })
            .collect();

        Finding {
            id: format!("{}/{}", ids::PATTERN_MATCH, pattern.id),
            severity: pattern.severity,
            title,
            description,
            method_id: MethodId::new(ids::PATTERN_MATCH),
            domain: Some(pattern.domain),
            pattern_id: Some(pattern.id.clone()),
            evidence,
        }
    }
}

impl VerificationMethod for PatternMatchMethod {
    fn id(&self) -> &str {
        ids::PATTERN_MATCH
    }

    fn name(&self) -> &'static str {
        "Pattern Match"
    }

    fn description(&self) -> &'static str {
        "Matches the library of known problem signatures against the artifact"
    }

    fn execute(
        &self,
        artifact_text: &str,
        detection: &DomainDetectionResult,
        _ctx: &MethodContext,
    ) -> Result<Vec<Finding>, MethodError> {
        // An empty detected-domain list means "no filter": match everything.
        let domains = detection.domain_values();
        let candidates = self.library.get_patterns(&domains);
        let matcher = PatternMatcher::with_threshold(&self.library, self.threshold);
        let results = matcher.match_patterns(artifact_text, &candidates);
        debug!(
            candidates = candidates.len(),
            matches = results.len(),
            "pattern match complete"
        );
        Ok(results.iter().map(|r| self.finding_from_match(r)).collect())
    }
}
