//! Rule-source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where pattern definitions come from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule files or directories, loaded in order (later sources override
    /// earlier ones on duplicate pattern ids).
    pub paths: Vec<PathBuf>,
    /// Whether the embedded built-in rule set is loaded first.
    pub include_builtin: Option<bool>,
}

impl RulesConfig {
    pub fn include_builtin(&self) -> bool {
        self.include_builtin.unwrap_or(true)
    }
}
