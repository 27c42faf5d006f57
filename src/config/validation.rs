//! Host options validation.
//!
//! # Responsibilities
//! - Semantic checks that serde cannot express
//!
//! # Design Decisions
//! - Validation is a pure function: ProviderOptions → Result<(), ValidationError>
//! - Runs before options are handed to the watcher

use thiserror::Error;

use crate::config::schema::ProviderOptions;

/// A semantic problem in the host options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("config_file must not be empty")]
    EmptyConfigFile,
}

/// Check host options for values that would never resolve to a file.
pub fn validate_options(options: &ProviderOptions) -> Result<(), ValidationError> {
    match &options.config_file {
        Some(path) if path.as_os_str().is_empty() => Err(ValidationError::EmptyConfigFile),
        _ => Ok(()),
    }
}
