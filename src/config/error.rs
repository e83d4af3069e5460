//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean environment variable held something other than true/false/1/0/yes/no.
    #[error("failed to parse {name}='{value}': expected a boolean")]
    InvalidBool { name: &'static str, value: String },

    /// `max_seq_len` must leave room for at least one token.
    #[error("max_seq_len must be greater than zero")]
    ZeroMaxSeqLen,

    /// Model-backed generation was requested without a model directory.
    #[error("no model directory configured (set QEMBED_MODEL_DIR, pass --model-dir, or use --stub)")]
    MissingModelDir,

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
