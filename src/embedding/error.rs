use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned while loading a model or embedding a question.
pub enum EmbeddingError {
    /// A required model file is missing.
    #[error("embedding model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    /// Model weights, config or tokenizer could not be read.
    #[error("failed to load embedding model: {reason}")]
    ModelLoadFailed { reason: String },

    /// The forward pass or a tensor operation failed.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    /// The tokenizer rejected the text.
    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    /// Configuration values are out of range or inconsistent.
    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The question has no content tokens, e.g. empty or whitespace-only text.
    #[error("text produced no tokens to embed")]
    EmptySequence,
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
