use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading QA records.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The record file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON array of QA records.
    #[error("malformed QA records: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The id cannot be used as a file stem inside the output directory.
    #[error("question id {id:?} at index {index} cannot be used as a file name")]
    InvalidQuestionId { index: usize, id: String },
}
