//! Fixed-override classifier for operators that skip automatic
//! classification.

use vouch_core::errors::ClassifyError;
use vouch_core::types::{
    Ambiguity, ArtifactDomain, DomainConfidence, DomainDetectionResult,
};

use super::DomainClassifier;

/// Ignores the artifact and returns a caller-supplied domain list at
/// confidence 1.0.
#[derive(Debug, Clone)]
pub struct OverrideClassifier {
    domains: Vec<ArtifactDomain>,
}

impl OverrideClassifier {
    pub fn new(domains: Vec<ArtifactDomain>) -> Self {
        Self { domains }
    }
}

impl DomainClassifier for OverrideClassifier {
    fn id(&self) -> &str {
        "override"
    }

    fn detect(
        &self,
        _artifact_text: &str,
        _language_hint: Option<&str>,
    ) -> Result<DomainDetectionResult, ClassifyError> {
        let names: Vec<&str> = self.domains.iter().map(|d| d.name()).collect();
        Ok(DomainDetectionResult {
            domains: self
                .domains
                .iter()
                .map(|&domain| DomainConfidence {
                    domain,
                    confidence: 1.0,
                    signals: vec!["operator override".to_string()],
                })
                .collect(),
            reasoning: format!("Domain override: {}", names.join(", ")),
            ambiguity: Ambiguity::None,
        })
    }
}
