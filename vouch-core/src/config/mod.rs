//! Configuration system for Vouch.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod engine_config;
pub mod matcher_config;
pub mod rules_config;
pub mod verdict_config;
pub mod vouch_config;

pub use engine_config::EngineConfig;
pub use matcher_config::MatcherConfig;
pub use rules_config::RulesConfig;
pub use verdict_config::VerdictConfig;
pub use vouch_config::{CliOverrides, VouchConfig};
