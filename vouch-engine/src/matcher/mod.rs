//! Pattern matcher — confidence-weighted multi-signal matching of library
//! patterns against artifact text.

pub mod context;

use rayon::prelude::*;

use crate::library::{Pattern, PatternLibrary, Signal};

pub use context::MatchContext;

/// Default confidence threshold for a pattern to enter the result set.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// A signal that matched, with the first occurrence it matched at.
#[derive(Debug, Clone)]
pub struct MatchedSignal {
    pub signal: Signal,
    pub matched_text: String,
    /// 1-based line of the first occurrence.
    pub line_number: u32,
}

/// One pattern's match against one artifact.
#[derive(Debug, Clone)]
pub struct MatchResult<'lib> {
    pub pattern: &'lib Pattern,
    /// Matched signal weight over total signal weight, in `[0, 1]`.
    pub confidence: f32,
    pub matched_signals: Vec<MatchedSignal>,
    pub unmatched_signals: Vec<Signal>,
}

/// Matches library patterns against artifact text.
///
/// Stateless apart from its threshold; a `MatchContext` is rebuilt per
/// call, so one matcher may serve concurrent callers.
pub struct PatternMatcher<'lib> {
    library: &'lib PatternLibrary,
    threshold: f32,
}

impl<'lib> PatternMatcher<'lib> {
    /// A matcher over `library` at the default threshold.
    pub fn new(library: &'lib PatternLibrary) -> Self {
        Self::with_threshold(library, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    /// A matcher with a caller-chosen threshold (`1.0` for "all signals
    /// required", lower for exploratory matching).
    pub fn with_threshold(library: &'lib PatternLibrary, threshold: f32) -> Self {
        Self { library, threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Match every library pattern against `text`.
    ///
    /// Results are ordered descending by confidence, ties ascending by
    /// pattern id.
    pub fn match_all(&self, text: &str) -> Vec<MatchResult<'lib>> {
        self.match_patterns(text, &self.library.get_patterns(&[]))
    }

    /// Match a caller-filtered candidate set against `text`.
    pub fn match_patterns(
        &self,
        text: &str,
        candidates: &[&'lib Pattern],
    ) -> Vec<MatchResult<'lib>> {
        let context = MatchContext::new(text);
        let mut results: Vec<MatchResult<'lib>> = candidates
            .par_iter()
            .filter_map(|pattern| self.evaluate(&context, pattern))
            .collect();
        // Parallel collection order is nondeterministic; sort for stable output.
        results.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.pattern.id.cmp(&b.pattern.id))
        });
        results
    }

    /// Match a single pattern against `text`. `None` when the pattern's
    /// confidence falls below the matcher's threshold or it has no signals.
    pub fn match_single(&self, text: &str, pattern: &'lib Pattern) -> Option<MatchResult<'lib>> {
        let context = MatchContext::new(text);
        self.evaluate(&context, pattern)
    }

    /// Evaluate all signals of one pattern against the full text.
    fn evaluate(
        &self,
        context: &MatchContext<'_>,
        pattern: &'lib Pattern,
    ) -> Option<MatchResult<'lib>> {
        let total_weight = pattern.total_weight();
        if total_weight <= 0.0 {
            // Zero signals (or all zero-weight): never matches.
            return None;
        }

        let mut matched_signals = Vec::new();
        let mut unmatched_signals = Vec::new();
        let mut matched_weight = 0.0f32;

        for signal in &pattern.signals {
            match signal.find_first(context.text()) {
                Some((offset, matched)) => {
                    matched_weight += signal.weight;
                    matched_signals.push(MatchedSignal {
                        signal: signal.clone(),
                        matched_text: matched.to_string(),
                        line_number: context.line_number(offset),
                    });
                }
                None => unmatched_signals.push(signal.clone()),
            }
        }

        let confidence = (matched_weight / total_weight).clamp(0.0, 1.0);
        if confidence < self.threshold || matched_signals.is_empty() {
            return None;
        }

        Some(MatchResult {
            pattern,
            confidence,
            matched_signals,
            unmatched_signals,
        })
    }
}
