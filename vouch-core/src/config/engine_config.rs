//! Verification-engine configuration.

use serde::{Deserialize, Serialize};

/// Engine-level tunables: timeout, enabled methods, enabled domains.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Overall verification budget in seconds. Default 30.
    pub timeout_secs: Option<u64>,
    /// Methods the deployment enables. Empty means "all registered".
    pub enabled_methods: Vec<String>,
    /// Domains the deployment recognizes. Empty means "all".
    pub enabled_domains: Vec<String>,
}

impl EngineConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS)
    }
}
