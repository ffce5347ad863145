//! Shared data model for the verification engine.

pub mod collections;
pub mod domain;
pub mod finding;
pub mod severity;
pub mod verdict;

pub use domain::{Ambiguity, ArtifactDomain, DomainConfidence, DomainDetectionResult};
pub use finding::{Evidence, Finding, MethodId, PatternId};
pub use severity::Severity;
pub use verdict::{Decision, Verdict};
