//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::parser::{self, ParseError};
use crate::config::schema::{ConfigRecord, ProviderOptions, ReloadMode};
use crate::config::validation::{validate_options, ValidationError};

/// Why a LeftClick file did not produce a record.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File is missing or unreadable. This is the normal "no config" state.
    #[error("Could not read file {}: {source}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File was read but is not a valid document.
    #[error("Error parsing XML: {0}")]
    Parse(#[from] ParseError),
}

/// Read and parse a LeftClick file.
///
/// With [`ReloadMode::Retain`] the parse starts from `previous`; otherwise from
/// defaults. The returned record is marked available.
pub fn load_record(
    path: &Path,
    mode: ReloadMode,
    previous: &ConfigRecord,
) -> Result<ConfigRecord, LoadError> {
    let data = fs::read(path).map_err(|source| LoadError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut record = match mode {
        ReloadMode::Fresh => parser::parse(&data)?,
        ReloadMode::Retain => parser::parse_onto(previous.clone(), &data)?,
    };
    record.available = true;
    Ok(record)
}

/// Error type for host options loading.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Load and validate host options from a TOML file.
pub fn load_options(path: &Path) -> Result<ProviderOptions, OptionsError> {
    let content = fs::read_to_string(path)?;
    let options: ProviderOptions = toml::from_str(&content)?;

    validate_options(&options)?;

    Ok(options)
}
