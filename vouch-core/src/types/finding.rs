//! Findings, evidence, and the identifier newtypes they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::ArtifactDomain;
use super::severity::Severity;

/// Validated pattern identifier: 2-3 uppercase letters, a dash, 3 digits
/// (`CC-001`, `SEC-004`). Identity key of a pattern; immutable once created.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PatternId(String);

impl PatternId {
    /// Parse and validate a pattern id.
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Check the `^[A-Z]{2,3}-[0-9]{3}$` format without allocating.
    pub fn is_valid(s: &str) -> bool {
        let bytes = s.as_bytes();
        let dash = match bytes.iter().position(|&b| b == b'-') {
            Some(i) => i,
            None => return false,
        };
        if !(2..=3).contains(&dash) || bytes.len() != dash + 4 {
            return false;
        }
        bytes[..dash].iter().all(|b| b.is_ascii_uppercase())
            && bytes[dash + 1..].iter().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PatternId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(format!("invalid pattern id '{s}' (expected e.g. CC-001)"))
        }
    }
}

impl From<PatternId> for String {
    fn from(id: PatternId) -> Self {
        id.0
    }
}

/// Identifier of a verification method (`pattern-match`, `adversarial-review`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A quoted piece of artifact text supporting a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// The quoted artifact text.
    pub quote: String,
    /// 1-based line of the quote, when known.
    pub line_number: Option<u32>,
    /// Label of whatever produced the quote (a signal, a reviewer note).
    pub source: String,
    /// Producer confidence in this piece of evidence, when it reports one.
    pub confidence: Option<f32>,
}

/// A single reported issue produced by one verification method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// The method that produced this finding.
    pub method_id: MethodId,
    pub domain: Option<ArtifactDomain>,
    /// Set when the finding came from a library pattern match.
    pub pattern_id: Option<PatternId>,
    pub evidence: Vec<Evidence>,
}
