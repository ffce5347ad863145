//! Core types, errors, configuration, and traits shared across the Vouch
//! verification engine.
//!
//! This crate carries no matching or orchestration logic; it defines the
//! data model (severities, domains, findings, verdicts), one error enum per
//! subsystem, the layered TOML configuration, and the cancellation traits
//! used by long-running operations.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;
