//! Adapter for externally-provided reasoning methods.
//!
//! The engine never calls a model; providers are opaque producers of
//! findings living behind `ReasoningProvider`. Each configured provider is
//! wrapped in a `ReasoningMethod` so the engine can treat it like any
//! other method.

use std::sync::Arc;

use vouch_core::errors::MethodError;
use vouch_core::types::{DomainDetectionResult, Finding, MethodId};

use super::{MethodContext, VerificationMethod};

/// Everything a provider gets to see for one invocation.
#[derive(Debug)]
pub struct ReasoningRequest<'a> {
    pub artifact_text: &'a str,
    pub detection: &'a DomainDetectionResult,
    pub file_path: Option<&'a str>,
    pub language: Option<&'a str>,
}

/// An external producer of findings (boundary analysis, adversarial
/// review, and the other reasoning-backed procedures).
///
/// Implementations own their transport and any retry policy; the engine
/// only budgets them against the run deadline and recovers from their
/// failures.
pub trait ReasoningProvider: Send + Sync {
    fn analyze(&self, request: ReasoningRequest<'_>) -> Result<Vec<Finding>, MethodError>;
}

/// Wraps a provider as a `VerificationMethod` under a fixed id.
pub struct ReasoningMethod {
    id: String,
    name: &'static str,
    description: &'static str,
    provider: Arc<dyn ReasoningProvider>,
}

impl ReasoningMethod {
    pub fn new(
        id: impl Into<String>,
        name: &'static str,
        description: &'static str,
        provider: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            description,
            provider,
        }
    }
}

impl VerificationMethod for ReasoningMethod {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn execute(
        &self,
        artifact_text: &str,
        detection: &DomainDetectionResult,
        ctx: &MethodContext,
    ) -> Result<Vec<Finding>, MethodError> {
        let request = ReasoningRequest {
            artifact_text,
            detection,
            file_path: ctx.file_path.as_deref(),
            language: ctx.language.as_deref(),
        };
        let mut findings = self.provider.analyze(request)?;
        // Findings answer for their producing method, whatever the
        // provider stamped on them.
        for finding in &mut findings {
            finding.method_id = MethodId::new(&self.id);
        }
        Ok(findings)
    }
}
