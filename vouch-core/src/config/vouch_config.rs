//! Top-level Vouch configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

use super::{EngineConfig, MatcherConfig, RulesConfig, VerdictConfig};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VOUCH_*`)
/// 3. Project config (`vouch.toml` in project root)
/// 4. User config (`~/.vouch/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VouchConfig {
    pub rules: RulesConfig,
    pub matcher: MatcherConfig,
    pub verdict: VerdictConfig,
    pub engine: EngineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub timeout_secs: Option<u64>,
    pub confidence_threshold: Option<f32>,
    pub enabled_methods: Option<Vec<String>>,
}

impl VouchConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(_) => {
                        // Unreadable user config falls back to defaults.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("vouch.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &VouchConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.matcher.confidence_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "matcher.confidence_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(timeout) = config.engine.timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.timeout_secs".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        for (field, weight) in [
            ("verdict.critical_weight", config.verdict.critical_weight),
            ("verdict.error_weight", config.verdict.error_weight),
            ("verdict.warning_weight", config.verdict.warning_weight),
            ("verdict.info_weight", config.verdict.info_weight),
        ] {
            if let Some(w) = weight {
                if w < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be non-negative".to_string(),
                    });
                }
            }
        }
        if let (Some(reject), Some(uncertain)) = (
            config.verdict.reject_threshold,
            config.verdict.uncertain_threshold,
        ) {
            if reject <= uncertain {
                return Err(ConfigError::ValidationFailed {
                    field: "verdict.reject_threshold".to_string(),
                    message: "must be greater than verdict.uncertain_threshold".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.vouch/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".vouch").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VouchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: VouchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut VouchConfig, other: &VouchConfig) {
        // Rules
        if !other.rules.paths.is_empty() {
            base.rules.paths = other.rules.paths.clone();
        }
        if other.rules.include_builtin.is_some() {
            base.rules.include_builtin = other.rules.include_builtin;
        }

        // Matcher
        if other.matcher.confidence_threshold.is_some() {
            base.matcher.confidence_threshold = other.matcher.confidence_threshold;
        }

        // Verdict
        if other.verdict.critical_weight.is_some() {
            base.verdict.critical_weight = other.verdict.critical_weight;
        }
        if other.verdict.error_weight.is_some() {
            base.verdict.error_weight = other.verdict.error_weight;
        }
        if other.verdict.warning_weight.is_some() {
            base.verdict.warning_weight = other.verdict.warning_weight;
        }
        if other.verdict.info_weight.is_some() {
            base.verdict.info_weight = other.verdict.info_weight;
        }
        if other.verdict.reject_threshold.is_some() {
            base.verdict.reject_threshold = other.verdict.reject_threshold;
        }
        if other.verdict.uncertain_threshold.is_some() {
            base.verdict.uncertain_threshold = other.verdict.uncertain_threshold;
        }

        // Engine
        if other.engine.timeout_secs.is_some() {
            base.engine.timeout_secs = other.engine.timeout_secs;
        }
        if !other.engine.enabled_methods.is_empty() {
            base.engine.enabled_methods = other.engine.enabled_methods.clone();
        }
        if !other.engine.enabled_domains.is_empty() {
            base.engine.enabled_domains = other.engine.enabled_domains.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VOUCH_ENGINE_TIMEOUT_SECS`, `VOUCH_MATCHER_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut VouchConfig) {
        if let Ok(val) = std::env::var("VOUCH_ENGINE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.engine.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VOUCH_MATCHER_THRESHOLD") {
            if let Ok(v) = val.parse::<f32>() {
                config.matcher.confidence_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VOUCH_VERDICT_REJECT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.verdict.reject_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VOUCH_VERDICT_UNCERTAIN_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.verdict.uncertain_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VOUCH_ENGINE_ENABLED_METHODS") {
            let methods: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !methods.is_empty() {
                config.engine.enabled_methods = methods;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut VouchConfig, cli: &CliOverrides) {
        if let Some(v) = cli.timeout_secs {
            config.engine.timeout_secs = Some(v);
        }
        if let Some(v) = cli.confidence_threshold {
            config.matcher.confidence_threshold = Some(v);
        }
        if let Some(ref v) = cli.enabled_methods {
            config.engine.enabled_methods = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
