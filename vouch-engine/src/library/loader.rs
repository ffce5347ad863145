//! Rule-source loading and validation.
//!
//! Sources are TOML or YAML documents with a top-level `patterns` list.
//! Validation order per record: id format, domain, severity, then signal
//! compilation; every failure names the offending pattern id, or its index
//! within the source when no valid id exists yet.

use std::path::Path;

use serde::Deserialize;
use smallvec::SmallVec;
use tracing::debug;

use vouch_core::errors::LibraryError;
use vouch_core::types::{ArtifactDomain, PatternId, Severity};

use super::types::{Pattern, Signal};

/// A rule document: a list of pattern records under a `patterns` key.
/// Absence of the key, or an empty document, yields zero patterns.
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    patterns: Vec<RuleRecord>,
}

/// Raw pattern record before validation. Required fields are optional here
/// so missing ones produce named errors instead of opaque parse failures.
#[derive(Debug, Deserialize)]
struct RuleRecord {
    id: Option<String>,
    domain: Option<String>,
    severity: Option<String>,
    #[serde(default)]
    signals: Vec<SignalDef>,
    description: Option<String>,
    remediation: Option<String>,
}

/// A signal record: a bare string (`"race condition"`, `"regex:[0-9]+"`) or
/// a table carrying an explicit weight.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignalDef {
    Spec(String),
    Weighted {
        pattern: String,
        #[serde(default = "default_signal_weight")]
        weight: f32,
    },
}

fn default_signal_weight() -> f32 {
    Signal::DEFAULT_WEIGHT
}

/// Load and validate all patterns from a single rule file, in file order.
pub fn load_file(path: &Path) -> Result<Vec<Pattern>, LibraryError> {
    let display_path = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| LibraryError::Io {
        path: display_path.clone(),
        message: e.to_string(),
    })?;
    let file = parse_document(path, &content)?;
    let patterns = validate(&display_path, file)?;
    debug!(source = %display_path, count = patterns.len(), "loaded rule source");
    Ok(patterns)
}

/// Load and validate patterns from an in-memory TOML document.
pub fn load_toml_str(source_name: &str, content: &str) -> Result<Vec<Pattern>, LibraryError> {
    let file: RuleFile = toml::from_str(content).map_err(|e| LibraryError::Parse {
        path: source_name.to_string(),
        message: e.to_string(),
    })?;
    validate(source_name, file)
}

/// Expand a source path into the rule files it contains, in deterministic
/// order: a file is itself; a directory yields its `.toml`/`.yaml`/`.yml`
/// entries in lexical file-name order (non-recursive).
pub fn expand_source(path: &Path) -> Result<Vec<std::path::PathBuf>, LibraryError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let entries = std::fs::read_dir(path).map_err(|e| LibraryError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut files: Vec<std::path::PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("toml") | Some("yaml") | Some("yml")
                )
        })
        .collect();
    files.sort();
    Ok(files)
}

fn parse_document(path: &Path, content: &str) -> Result<RuleFile, LibraryError> {
    let display = path.display().to_string();
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        // serde_yaml maps an entirely empty document to null; treat it as
        // an empty rule set per the source-format contract.
        if content.trim().is_empty() {
            return Ok(RuleFile { patterns: Vec::new() });
        }
        serde_yaml::from_str(content).map_err(|e| LibraryError::Parse {
            path: display,
            message: e.to_string(),
        })
    } else {
        toml::from_str(content).map_err(|e| LibraryError::Parse {
            path: display,
            message: e.to_string(),
        })
    }
}

/// Validate raw records into immutable patterns, preserving file order.
fn validate(source: &str, file: RuleFile) -> Result<Vec<Pattern>, LibraryError> {
    let mut patterns = Vec::with_capacity(file.patterns.len());
    for (index, record) in file.patterns.into_iter().enumerate() {
        patterns.push(validate_record(source, index, record)?);
    }
    Ok(patterns)
}

fn validate_record(
    source: &str,
    index: usize,
    record: RuleRecord,
) -> Result<Pattern, LibraryError> {
    let raw_id = record.id.ok_or(LibraryError::MissingField {
        path: source.to_string(),
        index,
        field: "id",
    })?;
    let id = PatternId::parse(&raw_id).ok_or_else(|| LibraryError::InvalidId {
        path: source.to_string(),
        id: raw_id.clone(),
    })?;

    let raw_domain = record.domain.ok_or(LibraryError::MissingField {
        path: source.to_string(),
        index,
        field: "domain",
    })?;
    let domain =
        ArtifactDomain::parse_str(&raw_domain).ok_or_else(|| LibraryError::UnknownDomain {
            id: raw_id.clone(),
            domain: raw_domain,
        })?;

    let raw_severity = record.severity.ok_or(LibraryError::MissingField {
        path: source.to_string(),
        index,
        field: "severity",
    })?;
    let severity =
        Severity::parse_str(&raw_severity).ok_or_else(|| LibraryError::UnknownSeverity {
            id: raw_id.clone(),
            severity: raw_severity,
        })?;

    let mut signals = SmallVec::new();
    for def in record.signals {
        let signal = match def {
            SignalDef::Spec(spec) => Signal::parse(&spec, Signal::DEFAULT_WEIGHT, &raw_id)?,
            SignalDef::Weighted { pattern, weight } => Signal::parse(&pattern, weight, &raw_id)?,
        };
        signals.push(signal);
    }

    Ok(Pattern {
        id,
        domain,
        severity,
        signals,
        description: record.description,
        remediation: record.remediation,
    })
}
