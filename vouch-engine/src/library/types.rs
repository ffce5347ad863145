//! Pattern and signal types — the atomic rule units of the library.

use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;

use vouch_core::errors::LibraryError;
use vouch_core::types::{ArtifactDomain, PatternId, Severity};

/// How a signal matches artifact text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Case-insensitive literal substring.
    Exact,
    /// Case-insensitive regular expression.
    Regex,
}

impl SignalKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Regex => "regex",
        }
    }
}

/// A single sub-check within a pattern.
///
/// Both kinds compile to a case-insensitive `Regex` at load time (exact
/// signals as escaped literals), so matching is uniform and Unicode case
/// folding comes from the regex engine.
#[derive(Debug, Clone)]
pub struct Signal {
    pub kind: SignalKind,
    /// The literal or regex source text, as written in the rule file.
    pub pattern: String,
    /// Non-negative contribution to the pattern's total weight.
    pub weight: f32,
    regex: Regex,
}

impl Signal {
    pub const DEFAULT_WEIGHT: f32 = 1.0;

    /// Compile a signal. `owner` is the pattern id used in error messages.
    pub fn compile(
        kind: SignalKind,
        pattern: &str,
        weight: f32,
        owner: &str,
    ) -> Result<Self, LibraryError> {
        if weight < 0.0 {
            return Err(LibraryError::NegativeWeight {
                id: owner.to_string(),
                weight,
            });
        }
        let source = match kind {
            SignalKind::Exact => regex::escape(pattern),
            SignalKind::Regex => pattern.to_string(),
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| LibraryError::InvalidRegex {
                id: owner.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            kind,
            pattern: pattern.to_string(),
            weight,
            regex,
        })
    }

    /// Parse the rule-file form: `regex:<expr>`, `exact:<literal>`, or a
    /// bare literal (exact by default).
    pub fn parse(spec: &str, weight: f32, owner: &str) -> Result<Self, LibraryError> {
        if let Some(expr) = spec.strip_prefix("regex:") {
            Self::compile(SignalKind::Regex, expr, weight, owner)
        } else if let Some(lit) = spec.strip_prefix("exact:") {
            Self::compile(SignalKind::Exact, lit, weight, owner)
        } else {
            Self::compile(SignalKind::Exact, spec, weight, owner)
        }
    }

    /// First occurrence in `text`: byte offset of the match start and the
    /// matched substring.
    pub fn find_first<'t>(&self, text: &'t str) -> Option<(usize, &'t str)> {
        self.regex.find(text).map(|m| (m.start(), m.as_str()))
    }

    /// Human-readable label for evidence and detection output.
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind.name(), self.pattern)
    }
}

/// A named rule describing a known problem signature via one or more
/// weighted signals. Owned exclusively by the library; immutable after load.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub id: PatternId,
    pub domain: ArtifactDomain,
    pub severity: Severity,
    pub signals: SmallVec<[Signal; 4]>,
    pub description: Option<String>,
    pub remediation: Option<String>,
}

impl Pattern {
    /// Sum of all signal weights. Zero for a signal-less pattern, which
    /// therefore can never match.
    pub fn total_weight(&self) -> f32 {
        self.signals.iter().map(|s| s.weight).sum()
    }
}
