//! Data-model tests: identifier validation, severity ordering, serde forms.

use vouch_core::types::{
    Ambiguity, ArtifactDomain, Decision, DomainDetectionResult, PatternId, Severity,
};

#[test]
fn pattern_id_accepts_the_documented_format() {
    for valid in ["CC-001", "SEC-004", "ERR-999", "AB-000"] {
        assert!(PatternId::is_valid(valid), "{valid} should be valid");
    }
}

#[test]
fn pattern_id_rejects_malformed_ids() {
    for invalid in [
        "", "CC001", "C-001", "CCCC-001", "cc-001", "CC-01", "CC-0011", "CC-01a",
        "CC_001", "-001", "CC-",
    ] {
        assert!(!PatternId::is_valid(invalid), "{invalid} should be invalid");
    }
}

#[test]
fn pattern_id_deserialization_validates() {
    let ok: Result<PatternId, _> = serde_json::from_str("\"CC-001\"");
    assert!(ok.is_ok());
    let bad: Result<PatternId, _> = serde_json::from_str("\"not-an-id\"");
    assert!(bad.is_err(), "invalid id must fail to deserialize");
}

#[test]
fn severity_orders_by_blast_radius() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Critical);
}

#[test]
fn severity_parse_round_trips() {
    for severity in Severity::all() {
        assert_eq!(Severity::parse_str(severity.name()), Some(*severity));
    }
    assert_eq!(Severity::parse_str("CRITICAL"), Some(Severity::Critical));
    assert_eq!(Severity::parse_str("fatal"), None);
}

#[test]
fn domain_parse_round_trips() {
    for domain in ArtifactDomain::all() {
        assert_eq!(ArtifactDomain::parse_str(domain.name()), Some(*domain));
    }
    assert_eq!(
        ArtifactDomain::parse_str("error-handling"),
        Some(ArtifactDomain::ErrorHandling)
    );
    assert_eq!(ArtifactDomain::parse_str("quantum"), None);
}

#[test]
fn decision_serializes_uppercase() {
    assert_eq!(serde_json::to_string(&Decision::Accept).unwrap(), "\"ACCEPT\"");
    assert_eq!(serde_json::to_string(&Decision::Reject).unwrap(), "\"REJECT\"");
    assert_eq!(
        serde_json::to_string(&Decision::Uncertain).unwrap(),
        "\"UNCERTAIN\""
    );
}

#[test]
fn unknown_detection_is_empty_and_highly_ambiguous() {
    let detection = DomainDetectionResult::unknown("nothing to go on");
    assert!(detection.domains.is_empty());
    assert_eq!(detection.ambiguity, Ambiguity::High);
    assert!(detection.domain_values().is_empty());
}
