//! Pattern-library tests: loading, validation order, override semantics,
//! deterministic query surface.

use std::path::PathBuf;

use tempfile::TempDir;

use vouch_core::errors::LibraryError;
use vouch_core::types::{ArtifactDomain, PatternId, Severity};
use vouch_engine::library::PatternLibrary;

fn write_rules(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const BASIC_RULES: &str = r#"
[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "critical"
signals = ["race condition", "concurrent access"]
description = "Unsynchronized access to shared state"

[[patterns]]
id = "SEC-004"
domain = "security"
severity = "error"
signals = ["regex:password\\s*=", "hardcoded credential"]
"#;

#[test]
fn loads_patterns_from_a_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "rules.toml", BASIC_RULES);

    let library = PatternLibrary::load(&[path]).unwrap();
    assert_eq!(library.len(), 2);

    let id = PatternId::parse("CC-001").unwrap();
    let pattern = library.get_pattern(&id).expect("CC-001 should be loaded");
    assert_eq!(pattern.domain, ArtifactDomain::Concurrency);
    assert_eq!(pattern.severity, Severity::Critical);
    assert_eq!(pattern.signals.len(), 2);
    assert_eq!(
        pattern.description.as_deref(),
        Some("Unsynchronized access to shared state")
    );
}

#[test]
fn loads_patterns_from_a_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rules.yaml",
        r#"
patterns:
  - id: ST-002
    domain: storage
    severity: warning
    signals:
      - "data loss"
      - pattern: "regex:fsync"
        weight: 2.0
"#,
    );

    let library = PatternLibrary::load(&[path]).unwrap();
    assert_eq!(library.len(), 1);
    let pattern = library
        .get_pattern(&PatternId::parse("ST-002").unwrap())
        .unwrap();
    assert_eq!(pattern.signals[1].weight, 2.0);
    assert_eq!(pattern.total_weight(), 3.0);
}

#[test]
fn empty_sources_load_zero_patterns() {
    let dir = TempDir::new().unwrap();
    let empty = write_rules(&dir, "empty.toml", "");
    let no_key = write_rules(&dir, "nokey.toml", "version = 1\n");
    let empty_yaml = write_rules(&dir, "empty.yaml", "");

    let library = PatternLibrary::load(&[empty, no_key, empty_yaml]).unwrap();
    assert_eq!(library.len(), 0);
    assert!(library.is_empty());
}

#[test]
fn non_list_patterns_value_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "bad.toml", "patterns = 7\n");
    let err = PatternLibrary::load(&[path]).unwrap_err();
    assert!(matches!(err, LibraryError::Parse { .. }));
}

#[test]
fn missing_id_names_the_record_index() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "bad.toml",
        r#"
[[patterns]]
domain = "security"
severity = "error"
signals = ["x"]
"#,
    );
    let err = PatternLibrary::load(&[path]).unwrap_err();
    match err {
        LibraryError::MissingField { index, field, .. } => {
            assert_eq!(index, 0);
            assert_eq!(field, "id");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn invalid_id_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "bad.toml",
        r#"
[[patterns]]
id = "lowercase-001"
domain = "security"
severity = "error"
signals = ["x"]
"#,
    );
    let err = PatternLibrary::load(&[path]).unwrap_err();
    match err {
        LibraryError::InvalidId { id, .. } => assert_eq!(id, "lowercase-001"),
        other => panic!("expected InvalidId, got {other:?}"),
    }
}

#[test]
fn unknown_domain_names_the_pattern() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "bad.toml",
        r#"
[[patterns]]
id = "XX-001"
domain = "astrology"
severity = "error"
signals = ["x"]
"#,
    );
    let err = PatternLibrary::load(&[path]).unwrap_err();
    match err {
        LibraryError::UnknownDomain { id, domain } => {
            assert_eq!(id, "XX-001");
            assert_eq!(domain, "astrology");
        }
        other => panic!("expected UnknownDomain, got {other:?}"),
    }
}

#[test]
fn unknown_severity_names_the_pattern() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "bad.toml",
        r#"
[[patterns]]
id = "XX-001"
domain = "security"
severity = "catastrophic"
signals = ["x"]
"#,
    );
    let err = PatternLibrary::load(&[path]).unwrap_err();
    assert!(matches!(err, LibraryError::UnknownSeverity { .. }));
}

#[test]
fn invalid_regex_names_the_pattern() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "bad.toml",
        r#"
[[patterns]]
id = "XX-001"
domain = "security"
severity = "error"
signals = ["regex:([unclosed"]
"#,
    );
    let err = PatternLibrary::load(&[path]).unwrap_err();
    match err {
        LibraryError::InvalidRegex { id, .. } => assert_eq!(id, "XX-001"),
        other => panic!("expected InvalidRegex, got {other:?}"),
    }
}

#[test]
fn later_sources_override_earlier_ones() {
    let dir = TempDir::new().unwrap();
    let first = write_rules(
        &dir,
        "first.toml",
        r#"
[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "warning"
signals = ["old signal"]
"#,
    );
    let second = write_rules(
        &dir,
        "second.toml",
        r#"
[[patterns]]
id = "CC-001"
domain = "security"
severity = "critical"
signals = ["new signal"]
description = "replacement"
"#,
    );

    let library = PatternLibrary::load(&[first, second]).unwrap();
    assert_eq!(library.len(), 1, "duplicate ids collapse to one pattern");

    let pattern = library
        .get_pattern(&PatternId::parse("CC-001").unwrap())
        .unwrap();
    // Every field comes from the later definition.
    assert_eq!(pattern.domain, ArtifactDomain::Security);
    assert_eq!(pattern.severity, Severity::Critical);
    assert_eq!(pattern.signals[0].pattern, "new signal");
    assert_eq!(pattern.description.as_deref(), Some("replacement"));
}

#[test]
fn intra_source_duplicates_use_the_last_definition() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "dup.toml",
        r#"
[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "info"
signals = ["first"]

[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "error"
signals = ["second"]
"#,
    );
    let library = PatternLibrary::load(&[path]).unwrap();
    assert_eq!(library.len(), 1);
    let pattern = library
        .get_pattern(&PatternId::parse("CC-001").unwrap())
        .unwrap();
    assert_eq!(pattern.severity, Severity::Error);
}

#[test]
fn loading_the_same_source_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "rules.toml", BASIC_RULES);

    let once = PatternLibrary::load(&[path.clone()]).unwrap();
    let twice = PatternLibrary::load(&[path.clone(), path]).unwrap();
    assert_eq!(once.len(), twice.len());

    let id = PatternId::parse("CC-001").unwrap();
    let a = once.get_pattern(&id).unwrap();
    let b = twice.get_pattern(&id).unwrap();
    assert_eq!(a.severity, b.severity);
    assert_eq!(a.domain, b.domain);
    assert_eq!(a.signals.len(), b.signals.len());
}

#[test]
fn directory_sources_load_in_lexical_order() {
    let dir = TempDir::new().unwrap();
    write_rules(
        &dir,
        "b_second.toml",
        r#"
[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "critical"
signals = ["wins"]
"#,
    );
    write_rules(
        &dir,
        "a_first.toml",
        r#"
[[patterns]]
id = "CC-001"
domain = "concurrency"
severity = "info"
signals = ["loses"]
"#,
    );
    // Non-rule files in the directory are ignored.
    std::fs::write(dir.path().join("notes.txt"), "not rules").unwrap();

    let library = PatternLibrary::load(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(library.len(), 1);
    let pattern = library
        .get_pattern(&PatternId::parse("CC-001").unwrap())
        .unwrap();
    assert_eq!(pattern.severity, Severity::Critical, "b_* loads after a_*");
}

#[test]
fn get_patterns_returns_ascending_ids() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rules.toml",
        r#"
[[patterns]]
id = "ST-001"
domain = "storage"
severity = "info"
signals = ["s"]

[[patterns]]
id = "API-002"
domain = "api"
severity = "info"
signals = ["a"]

[[patterns]]
id = "CC-003"
domain = "concurrency"
severity = "info"
signals = ["c"]
"#,
    );
    let library = PatternLibrary::load(&[path]).unwrap();

    let ids: Vec<String> = library
        .get_patterns(&[])
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "ids must come back in ascending order");

    let concurrency = library.get_patterns(&[ArtifactDomain::Concurrency]);
    assert_eq!(concurrency.len(), 1);
    assert_eq!(concurrency[0].id.as_str(), "CC-003");
}

#[test]
fn require_pattern_raises_on_missing_id() {
    let library = PatternLibrary::new();
    let id = PatternId::parse("ZZ-999").unwrap();
    assert!(library.get_pattern(&id).is_none());
    let err = library.require_pattern(&id).unwrap_err();
    assert!(matches!(err, LibraryError::PatternNotFound { .. }));
}

#[test]
fn builtin_rule_set_is_valid() {
    let library = PatternLibrary::builtin();
    assert!(!library.is_empty(), "builtin rules must load");
    assert!(library
        .get_pattern(&PatternId::parse("CC-001").unwrap())
        .is_some());
    // Every builtin pattern has at least one signal and can be queried.
    for pattern in library.get_patterns(&[]) {
        assert!(
            !pattern.signals.is_empty(),
            "builtin pattern {} has no signals",
            pattern.id
        );
    }
}
