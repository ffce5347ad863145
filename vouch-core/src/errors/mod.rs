//! Error handling for Vouch.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod classify_error;
pub mod config_error;
pub mod error_code;
pub mod library_error;
pub mod method_error;
pub mod verify_error;

pub use classify_error::ClassifyError;
pub use config_error::ConfigError;
pub use error_code::VouchErrorCode;
pub use library_error::LibraryError;
pub use method_error::MethodError;
pub use verify_error::VerifyError;
