use thiserror::Error;

use crate::dataset::QuestionId;
use crate::embedding::EmbeddingError;
use crate::storage::StorageError;

/// Errors from the generation and validation passes. Each carries the failing question id.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to embed question {question_id}: {source}")]
    Embedding {
        question_id: QuestionId,
        #[source]
        source: EmbeddingError,
    },

    #[error("storage failure for question {question_id}: {source}")]
    Storage {
        question_id: QuestionId,
        #[source]
        source: StorageError,
    },

    #[error("question {question_id} has embedding dim {found}, expected {expected}")]
    DimensionMismatch {
        question_id: QuestionId,
        expected: usize,
        found: usize,
    },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
