//! Problem domains and domain-detection results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A problem domain an artifact can touch.
///
/// Closed enumeration; deployments restrict the active subset through
/// `[engine] enabled_domains` rather than editing this type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactDomain {
    Api,
    Concurrency,
    Configuration,
    ErrorHandling,
    Performance,
    Security,
    Storage,
    Testing,
    Validation,
}

impl ArtifactDomain {
    /// Parse a domain name (case-insensitive, kebab-case). Returns `None`
    /// for unknown names.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Some(Self::Api),
            "concurrency" => Some(Self::Concurrency),
            "configuration" => Some(Self::Configuration),
            "error-handling" => Some(Self::ErrorHandling),
            "performance" => Some(Self::Performance),
            "security" => Some(Self::Security),
            "storage" => Some(Self::Storage),
            "testing" => Some(Self::Testing),
            "validation" => Some(Self::Validation),
            _ => None,
        }
    }

    /// Domain name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Concurrency => "concurrency",
            Self::Configuration => "configuration",
            Self::ErrorHandling => "error-handling",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Storage => "storage",
            Self::Testing => "testing",
            Self::Validation => "validation",
        }
    }

    /// All domains.
    pub fn all() -> &'static [ArtifactDomain] {
        &[
            Self::Api,
            Self::Concurrency,
            Self::Configuration,
            Self::ErrorHandling,
            Self::Performance,
            Self::Security,
            Self::Storage,
            Self::Testing,
            Self::Validation,
        ]
    }
}

impl fmt::Display for ArtifactDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How ambiguous a domain detection is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ambiguity {
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// A single detected domain with its confidence and the human-readable
/// signal labels that justify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfidence {
    pub domain: ArtifactDomain,
    pub confidence: f32,
    pub signals: Vec<String>,
}

/// Result of running domain classification over an artifact.
///
/// Advisory input to method selection; never a hard gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDetectionResult {
    pub domains: Vec<DomainConfidence>,
    pub reasoning: String,
    pub ambiguity: Ambiguity,
}

impl DomainDetectionResult {
    /// An empty detection with the given reasoning, at high ambiguity.
    ///
    /// Used when classification was unavailable; an empty domain list means
    /// "no filter" to downstream consumers.
    pub fn unknown(reasoning: impl Into<String>) -> Self {
        Self {
            domains: Vec::new(),
            reasoning: reasoning.into(),
            ambiguity: Ambiguity::High,
        }
    }

    /// The detected domain values, dropping confidences.
    pub fn domain_values(&self) -> Vec<ArtifactDomain> {
        self.domains.iter().map(|d| d.domain).collect()
    }
}
