//! Pattern library — validated, versioned catalog of known problem
//! signatures, user-extensible without recompiling.
//!
//! Built once per process and read-only thereafter; safely shared across
//! concurrent verification runs. Rebuilt, not mutated, when rule sources
//! change.

pub mod loader;
pub mod types;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use vouch_core::errors::LibraryError;
use vouch_core::types::{ArtifactDomain, PatternId};

pub use types::{Pattern, Signal, SignalKind};

/// The built-in rule set shipped with the engine.
const BUILTIN_RULES: &str = include_str!("../../rules/builtin.toml");
const BUILTIN_SOURCE_NAME: &str = "<builtin>";

/// Indexed, immutable pattern catalog.
///
/// Duplicate ids across and within sources resolve last-loaded-wins, so
/// load order is significant: sources in list order, files within a
/// directory in lexical order, records within a file in file order.
#[derive(Debug, Default)]
pub struct PatternLibrary {
    patterns: BTreeMap<PatternId, Pattern>,
}

impl PatternLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded built-in rule set.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        // A load failure here is a packaging defect, not a runtime
        // condition; the builtin source is covered by tests.
        let patterns = loader::load_toml_str(BUILTIN_SOURCE_NAME, BUILTIN_RULES)
            .expect("built-in rule set must be valid");
        library.extend(patterns);
        library
    }

    /// Load a library from rule files and/or directories, in order.
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> Result<Self, LibraryError> {
        let mut library = Self::new();
        library.load_sources(sources)?;
        Ok(library)
    }

    /// Load additional sources into this library (later definitions
    /// override earlier ones on duplicate ids).
    pub fn load_sources<P: AsRef<Path>>(&mut self, sources: &[P]) -> Result<(), LibraryError> {
        for source in sources {
            for file in loader::expand_source(source.as_ref())? {
                let patterns = loader::load_file(&file)?;
                self.extend(patterns);
            }
        }
        info!(patterns = self.len(), "pattern library ready");
        Ok(())
    }

    /// Insert patterns in order, overriding on duplicate ids.
    fn extend(&mut self, patterns: Vec<Pattern>) {
        for pattern in patterns {
            self.patterns.insert(pattern.id.clone(), pattern);
        }
    }

    /// Look up a pattern by id.
    pub fn get_pattern(&self, id: &PatternId) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Look up a pattern by id, raising when absent.
    pub fn require_pattern(&self, id: &PatternId) -> Result<&Pattern, LibraryError> {
        self.get_pattern(id)
            .ok_or_else(|| LibraryError::PatternNotFound {
                id: id.to_string(),
            })
    }

    /// All patterns whose domain is in `domains`, ascending by id.
    /// An empty filter means all patterns.
    pub fn get_patterns(&self, domains: &[ArtifactDomain]) -> Vec<&Pattern> {
        self.patterns
            .values()
            .filter(|p| domains.is_empty() || domains.contains(&p.domain))
            .collect()
    }

    /// Number of distinct pattern ids.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
