//! Verdict-aggregator tests: scoring, decision bands, ordering, the force
//! policy, and policy-invariant validation.

use vouch_core::config::VerdictConfig;
use vouch_core::types::{Decision, Finding, MethodId, Severity};
use vouch_engine::verdict::{
    force_downgrade, scoring, DecisionBands, SeverityWeights, VerdictAggregator,
};

fn finding(id: &str, severity: Severity, method: &str) -> Finding {
    Finding {
        id: id.to_string(),
        severity,
        title: format!("finding {id}"),
        description: String::new(),
        method_id: MethodId::new(method),
        domain: None,
        pattern_id: None,
        evidence: Vec::new(),
    }
}

#[test]
fn no_findings_accepts() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(Vec::new(), Vec::new(), vec![MethodId::new("pattern-match")]);
    assert_eq!(verdict.decision, Decision::Accept);
    assert_eq!(verdict.score, 0.0);
    assert_eq!(verdict.summary, "Accepted: no findings.");
}

#[test]
fn score_is_the_severity_weighted_sum() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(
        vec![
            finding("a", Severity::Warning, "m"),
            finding("b", Severity::Error, "m"),
            finding("c", Severity::Info, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    let expected = scoring::DEFAULT_WARNING_WEIGHT
        + scoring::DEFAULT_ERROR_WEIGHT
        + scoring::DEFAULT_INFO_WEIGHT;
    assert!((verdict.score - expected).abs() < 1e-9);
}

#[test]
fn a_single_critical_finding_rejects() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(
        vec![finding("crit", Severity::Critical, "m")],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Reject);
}

#[test]
fn middle_band_scores_are_uncertain() {
    let aggregator = VerdictAggregator::new();
    // One error (3.0) sits between uncertain (2.0) and reject (8.0).
    let verdict = aggregator.aggregate(
        vec![finding("e", Severity::Error, "m")],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Uncertain);
}

#[test]
fn low_severity_findings_accept() {
    let aggregator = VerdictAggregator::new();
    // Two warnings (1.0) stay below the uncertain threshold (2.0).
    let verdict = aggregator.aggregate(
        vec![
            finding("w1", Severity::Warning, "m"),
            finding("w2", Severity::Warning, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Accept);
}

#[test]
fn accumulated_errors_cross_the_reject_threshold() {
    let aggregator = VerdictAggregator::new();
    // Three errors (9.0) exceed the reject threshold (8.0), no critical.
    let verdict = aggregator.aggregate(
        vec![
            finding("e1", Severity::Error, "m"),
            finding("e2", Severity::Error, "m"),
            finding("e3", Severity::Error, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Reject);
}

#[test]
fn adding_a_critical_never_flips_reject_to_accept() {
    let aggregator = VerdictAggregator::new();
    let base = vec![
        finding("e1", Severity::Error, "m"),
        finding("e2", Severity::Error, "m"),
        finding("e3", Severity::Error, "m"),
    ];
    let rejected = aggregator.aggregate(base.clone(), Vec::new(), vec![MethodId::new("m")]);
    assert_eq!(rejected.decision, Decision::Reject);

    let mut with_critical = base;
    with_critical.push(finding("crit", Severity::Critical, "m"));
    let still_rejected =
        aggregator.aggregate(with_critical, Vec::new(), vec![MethodId::new("m")]);
    assert_eq!(still_rejected.decision, Decision::Reject);
    assert!(still_rejected.score > rejected.score, "score is monotonic too");
}

#[test]
fn findings_are_ordered_severity_then_method_then_id() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(
        vec![
            finding("b", Severity::Warning, "zeta"),
            finding("d", Severity::Critical, "alpha"),
            finding("c", Severity::Warning, "alpha"),
            finding("a", Severity::Warning, "alpha"),
        ],
        Vec::new(),
        vec![MethodId::new("zeta"), MethodId::new("alpha")],
    );

    let keys: Vec<(Severity, &str, &str)> = verdict
        .findings
        .iter()
        .map(|f| (f.severity, f.method_id.as_str(), f.id.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Severity::Critical, "alpha", "d"),
            (Severity::Warning, "alpha", "a"),
            (Severity::Warning, "alpha", "c"),
            (Severity::Warning, "zeta", "b"),
        ]
    );
    // Methods come back ascending by id.
    let methods: Vec<&str> = verdict.methods_executed.iter().map(|m| m.as_str()).collect();
    assert_eq!(methods, vec!["alpha", "zeta"]);
}

#[test]
fn duplicate_findings_from_one_method_do_not_inflate_the_score() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(
        vec![
            finding("e1", Severity::Error, "m"),
            finding("e1", Severity::Error, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.findings.len(), 1);
    assert!((verdict.score - scoring::DEFAULT_ERROR_WEIGHT).abs() < 1e-9);
}

#[test]
fn summary_names_the_top_findings() {
    let aggregator = VerdictAggregator::new();
    let verdict = aggregator.aggregate(
        vec![
            finding("w", Severity::Warning, "m"),
            finding("crit", Severity::Critical, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert!(verdict.summary.starts_with("Rejected: 1 critical finding(s)"));
    assert!(verdict.summary.contains("finding crit"));
}

#[test]
fn force_downgrades_error_only_rejects() {
    let aggregator = VerdictAggregator::new();
    let mut verdict = aggregator.aggregate(
        vec![
            finding("e1", Severity::Error, "m"),
            finding("e2", Severity::Error, "m"),
            finding("e3", Severity::Error, "m"),
        ],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Reject);

    assert!(force_downgrade(&mut verdict), "soft reject must downgrade");
    assert_eq!(verdict.decision, Decision::Uncertain);
    assert!(verdict.summary.contains("force policy"));
}

#[test]
fn force_cannot_bypass_a_critical_reject() {
    let aggregator = VerdictAggregator::new();
    let mut verdict = aggregator.aggregate(
        vec![finding("crit", Severity::Critical, "m")],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Reject);

    assert!(!force_downgrade(&mut verdict), "hard reject must stand");
    assert_eq!(verdict.decision, Decision::Reject);
}

#[test]
fn force_leaves_non_reject_verdicts_alone() {
    let aggregator = VerdictAggregator::new();
    let mut verdict =
        aggregator.aggregate(Vec::new(), Vec::new(), vec![MethodId::new("m")]);
    assert_eq!(verdict.decision, Decision::Accept);
    assert!(!force_downgrade(&mut verdict));
    assert_eq!(verdict.decision, Decision::Accept);
}

#[test]
fn config_overrides_the_scoring_policy() {
    let config = VerdictConfig {
        reject_threshold: Some(2.5),
        uncertain_threshold: Some(1.0),
        ..Default::default()
    };
    let aggregator = VerdictAggregator::from_config(&config).unwrap();
    // A single error (3.0) now crosses the lowered reject threshold.
    let verdict = aggregator.aggregate(
        vec![finding("e", Severity::Error, "m")],
        Vec::new(),
        vec![MethodId::new("m")],
    );
    assert_eq!(verdict.decision, Decision::Reject);
}

#[test]
fn non_monotonic_weights_are_rejected() {
    let weights = SeverityWeights {
        critical: 1.0,
        error: 5.0,
        warning: 0.5,
        info: 0.0,
    };
    assert!(VerdictAggregator::with_policy(weights, DecisionBands::default()).is_err());
}

#[test]
fn critical_weight_must_reach_the_reject_threshold() {
    let weights = SeverityWeights {
        critical: 5.0,
        error: 3.0,
        warning: 0.5,
        info: 0.0,
    };
    let bands = DecisionBands {
        reject: 8.0,
        uncertain: 2.0,
    };
    assert!(
        VerdictAggregator::with_policy(weights, bands).is_err(),
        "a lone critical finding must always be able to reject"
    );
}
