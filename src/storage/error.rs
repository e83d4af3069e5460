use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by the embedding store.
pub enum StorageError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The array could not be encoded to or decoded from `.npy`.
    #[error("npy error at {path}: {reason}")]
    Npy {
        /// File being read or written.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// No array has been saved for the question.
    #[error("embedding file not found: {path}")]
    NotFound {
        /// Expected file path.
        path: PathBuf,
    },

    /// A saved array is not `(sequence_len, embedding_dim)`.
    #[error("expected a 2-D array at {path}, found shape {dims:?}")]
    UnexpectedShape {
        /// Offending file.
        path: PathBuf,
        /// Shape that was found.
        dims: Vec<usize>,
    },

    /// Failed to create the output directory.
    #[error("output directory unavailable: {path}: {source}")]
    StorageUnavailable {
        /// Directory path.
        path: PathBuf,
        /// Why the directory could not be created.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
