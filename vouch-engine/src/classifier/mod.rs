//! Domain classification — assigns confidence-weighted domain labels to an
//! artifact.
//!
//! Two local implementations: a deterministic keyword classifier and a
//! fixed-override classifier. Reasoning-backed classifiers live outside
//! this crate and satisfy the same trait; the engine budgets them against
//! the overall deadline.

pub mod keyword;
pub mod r#override;

use vouch_core::errors::ClassifyError;
use vouch_core::types::DomainDetectionResult;

pub use keyword::KeywordClassifier;
pub use r#override::OverrideClassifier;

/// Assigns domain labels with confidences to an artifact.
///
/// Detection results are advisory inputs to method selection, never hard
/// gates: a caller may still run a method against a domain the classifier
/// was unsure about.
pub trait DomainClassifier: Send + Sync {
    /// Short identifier for logs and reasoning strings.
    fn id(&self) -> &str;

    /// Classify the artifact. `language_hint` is an optional language or
    /// format name supplied by the caller (`"rust"`, `"sql"`).
    fn detect(
        &self,
        artifact_text: &str,
        language_hint: Option<&str>,
    ) -> Result<DomainDetectionResult, ClassifyError>;
}
