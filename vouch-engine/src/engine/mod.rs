//! Verification engine — classification, method fan-out, aggregation.
//!
//! A `verify()` call is one unit of work: classify the artifact (unless
//! the caller overrides domains), run every enabled method on its own
//! thread, fan the findings back in under the deadline, and aggregate.
//! Per-method failures are recovered; the deadline cancels stragglers and
//! surfaces a timeout that carries whatever partial verdict exists.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::{debug, info, warn};

use vouch_core::config::VouchConfig;
use vouch_core::errors::{ConfigError, VerifyError};
use vouch_core::traits::{Cancellable, CancellationToken, Deadline};
use vouch_core::types::{ArtifactDomain, DomainDetectionResult, Finding, MethodId, Verdict};

use crate::classifier::{DomainClassifier, KeywordClassifier, OverrideClassifier};
use crate::library::PatternLibrary;
use crate::methods::{MethodContext, MethodRegistry, PatternMatchMethod, VerificationMethod};
use crate::verdict::VerdictAggregator;

/// Per-call context for a verification run.
#[derive(Debug, Clone, Default)]
pub struct VerifyContext {
    pub file_path: Option<String>,
    pub language: Option<String>,
    /// Skip automatic classification and use exactly these domains.
    pub domain_override: Option<Vec<ArtifactDomain>>,
    /// Restrict the run to these method ids (intersected with the
    /// engine's enabled set).
    pub method_allow_list: Option<Vec<String>>,
}

/// Orchestrates classification, method execution, and aggregation.
pub struct VerificationEngine {
    registry: MethodRegistry,
    classifier: Arc<dyn DomainClassifier>,
    aggregator: VerdictAggregator,
    /// Methods the deployment enables; empty means all registered.
    enabled_methods: Vec<String>,
    /// Domains the deployment recognizes; empty means all.
    enabled_domains: Vec<ArtifactDomain>,
}

/// Builder for `VerificationEngine`.
pub struct VerificationEngineBuilder {
    registry: MethodRegistry,
    classifier: Arc<dyn DomainClassifier>,
    aggregator: VerdictAggregator,
    enabled_methods: Vec<String>,
    enabled_domains: Vec<ArtifactDomain>,
    matcher_threshold: Option<f32>,
}

impl VerificationEngineBuilder {
    fn new() -> Self {
        Self {
            registry: MethodRegistry::new(),
            classifier: Arc::new(KeywordClassifier::new()),
            aggregator: VerdictAggregator::new(),
            enabled_methods: Vec::new(),
            enabled_domains: Vec::new(),
            matcher_threshold: None,
        }
    }

    /// Register the deterministic pattern-match method over `library`.
    pub fn library(mut self, library: Arc<PatternLibrary>) -> Self {
        let method = match self.matcher_threshold {
            Some(t) => PatternMatchMethod::with_threshold(library, t),
            None => PatternMatchMethod::new(library),
        };
        self.registry.register(Arc::new(method));
        self
    }

    /// Register an additional method (typically a wrapped reasoning
    /// provider).
    pub fn method(mut self, method: Arc<dyn VerificationMethod>) -> Self {
        self.registry.register(method);
        self
    }

    /// Replace the default keyword classifier.
    pub fn classifier(mut self, classifier: Arc<dyn DomainClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the default aggregation policy.
    pub fn aggregator(mut self, aggregator: VerdictAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Apply `[matcher]`, `[verdict]`, and `[engine]` configuration.
    /// Call before `library()` so the matcher threshold takes effect.
    pub fn config(mut self, config: &VouchConfig) -> Result<Self, ConfigError> {
        self.matcher_threshold = config.matcher.confidence_threshold;
        self.aggregator = VerdictAggregator::from_config(&config.verdict)?;
        self.enabled_methods = config.engine.enabled_methods.clone();
        self.enabled_domains = config
            .engine
            .enabled_domains
            .iter()
            .map(|name| {
                ArtifactDomain::parse_str(name).ok_or_else(|| ConfigError::ValidationFailed {
                    field: "engine.enabled_domains".to_string(),
                    message: format!("unknown domain '{name}'"),
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn build(self) -> VerificationEngine {
        VerificationEngine {
            registry: self.registry,
            classifier: self.classifier,
            aggregator: self.aggregator,
            enabled_methods: self.enabled_methods,
            enabled_domains: self.enabled_domains,
        }
    }
}

impl VerificationEngine {
    pub fn builder() -> VerificationEngineBuilder {
        VerificationEngineBuilder::new()
    }

    /// Ids of all registered methods, in registration order.
    pub fn method_ids(&self) -> Vec<&str> {
        self.registry.ids()
    }

    /// Verify an artifact within `timeout`.
    ///
    /// Fails with `VerifyError::Timeout` when the budget is exceeded; the
    /// error carries the verdict aggregated from methods that had already
    /// completed, if any had.
    pub fn verify(
        &self,
        artifact_text: &str,
        context: &VerifyContext,
        timeout: Duration,
    ) -> Result<Verdict, VerifyError> {
        let deadline = Deadline::after(timeout);
        let cancel = CancellationToken::new();
        let artifact: Arc<str> = Arc::from(artifact_text);

        let methods = self.registry.select(
            &self.enabled_methods,
            context.method_allow_list.as_deref(),
        );
        if methods.is_empty() {
            return Err(VerifyError::NoMethodsEnabled);
        }

        // Step 1: domain classification (advisory; respects override).
        let detection = Arc::new(self.classify(&artifact, context, &deadline));
        debug!(
            domains = detection.domains.len(),
            ambiguity = %detection.ambiguity,
            "classification complete"
        );

        // Steps 2-4: fan methods out, fan findings back in.
        let (completed, failed, timed_out) =
            self.run_methods(&methods, &artifact, &detection, context, &deadline, &cancel);

        if timed_out {
            cancel.cancel();
            let timeout_ms = timeout.as_millis() as u64;
            warn!(
                timeout_ms,
                completed = completed.len(),
                "verification deadline exceeded"
            );
            let partial = if completed.is_empty() {
                None
            } else {
                Some(Box::new(self.aggregate(completed, &detection)))
            };
            return Err(VerifyError::Timeout { timeout_ms, partial });
        }

        if completed.is_empty() {
            return Err(VerifyError::AllMethodsFailed {
                attempted: failed,
            });
        }

        // Steps 5-6: aggregate into the verdict.
        let verdict = self.aggregate(completed, &detection);
        info!(
            decision = %verdict.decision,
            score = verdict.score,
            findings = verdict.findings.len(),
            "verification complete"
        );
        Ok(verdict)
    }

    /// Classify the artifact, degrading to an unknown-domain detection on
    /// classifier failure or timeout (detection is advisory).
    fn classify(
        &self,
        artifact: &Arc<str>,
        context: &VerifyContext,
        deadline: &Deadline,
    ) -> DomainDetectionResult {
        if let Some(ref domains) = context.domain_override {
            let detection = OverrideClassifier::new(domains.clone())
                .detect(artifact, context.language.as_deref())
                .unwrap_or_else(|e| {
                    DomainDetectionResult::unknown(format!("Override failed: {e}"))
                });
            return self.restrict_domains(detection);
        }

        // Classifiers may be reasoning-backed and slow; run against the
        // remaining budget on a worker thread.
        let (tx, rx) = bounded(1);
        let classifier = Arc::clone(&self.classifier);
        let artifact = Arc::clone(artifact);
        let language = context.language.clone();
        let spawned = std::thread::Builder::new()
            .name("vouch-classify".to_string())
            .spawn(move || {
                let result = classifier.detect(&artifact, language.as_deref());
                let _ = tx.send(result);
            });
        if spawned.is_err() {
            warn!("failed to spawn classification thread");
            return DomainDetectionResult::unknown("Classification unavailable");
        }

        match rx.recv_timeout(deadline.remaining()) {
            Ok(Ok(detection)) => self.restrict_domains(detection),
            Ok(Err(e)) => {
                warn!(error = %e, "domain classification failed");
                DomainDetectionResult::unknown(format!("Classification failed: {e}"))
            }
            Err(_) => {
                warn!("domain classification timed out");
                DomainDetectionResult::unknown("Classification timed out")
            }
        }
    }

    /// Drop detected domains the deployment does not recognize.
    fn restrict_domains(&self, mut detection: DomainDetectionResult) -> DomainDetectionResult {
        if !self.enabled_domains.is_empty() {
            detection
                .domains
                .retain(|d| self.enabled_domains.contains(&d.domain));
        }
        detection
    }

    /// Execute methods concurrently, collecting until done or deadline.
    ///
    /// Returns (completed method findings, failed-method count, timed out).
    fn run_methods(
        &self,
        methods: &[Arc<dyn VerificationMethod>],
        artifact: &Arc<str>,
        detection: &Arc<DomainDetectionResult>,
        context: &VerifyContext,
        deadline: &Deadline,
        cancel: &CancellationToken,
    ) -> (Vec<(MethodId, Vec<Finding>)>, usize, bool) {
        let (tx, rx) = bounded(methods.len());
        let mut spawned = 0usize;
        let mut failed = 0usize;

        for method in methods {
            let id = method.id().to_string();
            let method = Arc::clone(method);
            let artifact = Arc::clone(artifact);
            let detection = Arc::clone(detection);
            let tx = tx.clone();
            let ctx = MethodContext {
                file_path: context.file_path.clone(),
                language: context.language.clone(),
                cancel: cancel.clone(),
            };
            let thread_id = id.clone();
            let handle = std::thread::Builder::new()
                .name(format!("vouch-method-{id}"))
                .spawn(move || {
                    let result = method.execute(&artifact, &detection, &ctx);
                    let _ = tx.send((thread_id, result));
                });
            match handle {
                Ok(_) => spawned += 1,
                Err(e) => {
                    warn!(method = %id, error = %e, "failed to spawn method");
                    failed += 1;
                }
            }
        }
        drop(tx);

        let mut completed = Vec::with_capacity(spawned);
        let mut received = 0usize;
        let mut timed_out = false;
        while received < spawned {
            match rx.recv_deadline(deadline.instant()) {
                Ok((id, Ok(findings))) => {
                    received += 1;
                    debug!(method = %id, findings = findings.len(), "method complete");
                    completed.push((MethodId::new(id), findings));
                }
                Ok((id, Err(e))) => {
                    received += 1;
                    failed += 1;
                    warn!(method = %id, error = %e, "method failed");
                }
                Err(RecvTimeoutError::Timeout) => {
                    timed_out = true;
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    // A sender dropped without sending: the method thread
                    // panicked. Count the remainder as failed.
                    failed += spawned - received;
                    break;
                }
            }
        }

        (completed, failed, timed_out)
    }

    fn aggregate(
        &self,
        completed: Vec<(MethodId, Vec<Finding>)>,
        detection: &DomainDetectionResult,
    ) -> Verdict {
        let mut methods_executed = Vec::with_capacity(completed.len());
        let mut findings = Vec::new();
        for (id, method_findings) in completed {
            methods_executed.push(id);
            findings.extend(method_findings);
        }
        self.aggregator
            .aggregate(findings, detection.domains.clone(), methods_executed)
    }
}
