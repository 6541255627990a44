//! Error type shared by the profile registry, the scorer and the commands.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::profile::ParameterKind;

/// Every failure the engine or a command can surface.
///
/// Engine errors are local and recoverable: the caller fixes the request
/// and tries again. The engine never substitutes a default value.
#[derive(Error, Debug)]
pub enum FloodError {
    #[error("unknown parameter kind: {0}")]
    UnknownParameterKind(String),

    #[error("invalid input for {kind}: {reason}")]
    InvalidInput { kind: String, reason: String },

    #[error("duplicate parameter in one evaluation: {0}")]
    DuplicateParameter(ParameterKind),

    #[error("degenerate profile {kind}: {reason}")]
    DegenerateProfile { kind: ParameterKind, reason: String },

    #[error("profile {0} registered more than once")]
    DuplicateProfile(ParameterKind),

    #[error("no observations to score")]
    NoObservations,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: invalid profile configuration: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{path}: invalid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FloodError {
    pub fn invalid_input(kind: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FloodError>;

/// Read a file into a string, tagging any failure with its path.
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| FloodError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON document read from `path`.
pub fn parse_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| FloodError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
