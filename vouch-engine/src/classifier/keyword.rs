//! Deterministic keyword-based domain classifier.

use vouch_core::errors::ClassifyError;
use vouch_core::types::{
    Ambiguity, ArtifactDomain, DomainConfidence, DomainDetectionResult,
};

use super::DomainClassifier;

/// Confidence a domain needs before it counts as "strong" for ambiguity
/// banding.
const STRONG_CONFIDENCE: f32 = 0.5;
/// Confidence at which a single dominant domain makes the detection
/// unambiguous.
const DOMINANT_CONFIDENCE: f32 = 0.75;

/// Static lexicon: domain plus the lowercase keywords that indicate it.
struct DomainLexicon {
    domain: ArtifactDomain,
    keywords: &'static [&'static str],
}

static LEXICON: &[DomainLexicon] = &[
    DomainLexicon {
        domain: ArtifactDomain::Api,
        keywords: &[
            "endpoint", "rest", "http", "request", "response", "route", "handler",
            "versioning", "contract", "grpc",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Concurrency,
        keywords: &[
            "thread", "mutex", "lock", "atomic", "race", "async", "await", "channel",
            "semaphore", "concurrent", "deadlock", "spawn",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Configuration,
        keywords: &[
            "config", "configuration", "environment variable", "env var", "settings",
            "toml", "yaml", "flag",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::ErrorHandling,
        keywords: &[
            "error", "exception", "panic", "catch", "unwrap", "retry", "fallback",
            "recover",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Performance,
        keywords: &[
            "latency", "throughput", "benchmark", "cache", "allocation", "hot path",
            "profil", "o(n",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Security,
        keywords: &[
            "password", "secret", "token", "auth", "encrypt", "injection", "sanitize",
            "credential", "vulnerab", "xss", "csrf",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Storage,
        keywords: &[
            "database", "sql", "query", "transaction", "index", "schema", "migration",
            "persist", "fsync", "durab",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Testing,
        keywords: &[
            "test", "assert", "mock", "fixture", "coverage", "flaky",
        ],
    },
    DomainLexicon {
        domain: ArtifactDomain::Validation,
        keywords: &[
            "validate", "validation", "schema check", "bounds check", "sanity check",
            "invariant",
        ],
    },
];

/// Language hints that imply a domain outright, counted as one extra hit.
fn hint_domain(hint: &str) -> Option<ArtifactDomain> {
    match hint.to_ascii_lowercase().as_str() {
        "sql" => Some(ArtifactDomain::Storage),
        "toml" | "yaml" | "ini" => Some(ArtifactDomain::Configuration),
        _ => None,
    }
}

/// Deterministic keyword/substring classifier. No I/O, no model calls;
/// identical input always yields identical output.
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Confidence from distinct keyword hits: each hit halves the
    /// remaining uncertainty (`1 - 0.5^hits`), capped at 1.0.
    fn confidence_for_hits(hits: u32) -> f32 {
        if hits == 0 {
            return 0.0;
        }
        1.0 - 0.5f32.powi(hits.min(10) as i32)
    }
}

impl DomainClassifier for KeywordClassifier {
    fn id(&self) -> &str {
        "keyword"
    }

    fn detect(
        &self,
        artifact_text: &str,
        language_hint: Option<&str>,
    ) -> Result<DomainDetectionResult, ClassifyError> {
        let haystack = artifact_text.to_lowercase();
        let hinted = language_hint.and_then(hint_domain);

        let mut domains = Vec::new();
        for entry in LEXICON {
            let mut signals: Vec<String> = entry
                .keywords
                .iter()
                .filter(|kw| haystack.contains(*kw))
                .map(|kw| format!("keyword: {kw}"))
                .collect();
            if hinted == Some(entry.domain) {
                signals.push(format!(
                    "language hint: {}",
                    language_hint.unwrap_or_default()
                ));
            }
            if signals.is_empty() {
                continue;
            }
            domains.push(DomainConfidence {
                domain: entry.domain,
                confidence: Self::confidence_for_hits(signals.len() as u32),
                signals,
            });
        }

        // Strongest first; domain order breaks ties deterministically.
        domains.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.domain.cmp(&b.domain))
        });

        let strong = domains
            .iter()
            .filter(|d| d.confidence >= STRONG_CONFIDENCE)
            .count();
        let top = domains.first().map(|d| d.confidence).unwrap_or(0.0);
        let ambiguity = if domains.is_empty() {
            Ambiguity::High
        } else if strong == 1 && top >= DOMINANT_CONFIDENCE {
            Ambiguity::None
        } else if strong <= 2 && top >= DOMINANT_CONFIDENCE {
            Ambiguity::Low
        } else if top >= STRONG_CONFIDENCE {
            Ambiguity::Medium
        } else {
            Ambiguity::High
        };

        let reasoning = if domains.is_empty() {
            "No domain keywords detected".to_string()
        } else {
            let parts: Vec<String> = domains
                .iter()
                .map(|d| format!("{} ({:.2})", d.domain, d.confidence))
                .collect();
            format!("Keyword evidence for: {}", parts.join(", "))
        };

        Ok(DomainDetectionResult {
            domains,
            reasoning,
            ambiguity,
        })
    }
}
