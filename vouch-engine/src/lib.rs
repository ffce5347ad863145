//! Vouch verification engine.
//!
//! Given a text artifact, the engine detects which problem domains it
//! touches, runs the enabled verification methods against it, and
//! aggregates their findings into a single accept/reject/uncertain verdict.
//!
//! The deterministic core is the pattern subsystem: a validated, versioned
//! library of known problem signatures (`library`), matched against
//! artifacts with confidence weighting (`matcher`), scored into a decision
//! (`verdict`), and orchestrated with the reasoning-backed methods behind
//! the `methods` traits (`engine`).

pub mod classifier;
pub mod engine;
pub mod library;
pub mod matcher;
pub mod methods;
pub mod verdict;

pub use classifier::{DomainClassifier, KeywordClassifier, OverrideClassifier};
pub use engine::{VerificationEngine, VerifyContext};
pub use library::{Pattern, PatternLibrary, Signal, SignalKind};
pub use matcher::{MatchResult, MatchedSignal, PatternMatcher};
pub use methods::{MethodRegistry, PatternMatchMethod, VerificationMethod};
pub use verdict::VerdictAggregator;
