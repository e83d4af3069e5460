//! Generation and validation passes over QA records.
//!
//! Both passes are strictly sequential and walk records in input order. Generation always
//! re-embeds and overwrites; there is no skip-if-exists.

mod error;


pub use error::{PipelineError, PipelineResult};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::dataset::{QaRecord, QuestionId};
use crate::embedding::SequenceEmbedder;
use crate::storage::{EmbeddingStore, StorageError};

/// Outcome of [`generate_embeddings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Arrays written (one per record, duplicates included).
    pub files_written: usize,
    /// Sum of all sequence lengths.
    pub total_rows: usize,
    /// Longest sequence written.
    pub max_len: usize,
    /// Final path of every written array, in record order.
    pub paths: Vec<PathBuf>,
}

/// Outcome of [`validate_embeddings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Arrays re-loaded.
    pub files_checked: usize,
    /// Largest first dimension seen; `0` when there are no records.
    pub max_len: usize,
    /// Last question reaching `max_len`.
    pub longest_question: Option<QuestionId>,
    /// Shared second dimension of every array.
    pub embedding_dim: Option<usize>,
}

/// Embeds every question and saves one `(sequence_len, embedding_dim)` array per record.
pub fn generate_embeddings<E>(
    records: &[QaRecord],
    embedder: &E,
    store: &EmbeddingStore,
) -> PipelineResult<GenerationReport>
where
    E: SequenceEmbedder + ?Sized,
{
    let expected_dim = embedder.embedding_dim();
    let mut report = GenerationReport::default();

    info!(
        records = records.len(),
        output_dir = %store.root().display(),
        embedding_dim = expected_dim,
        "Generating embeddings"
    );

    for record in records {
        let question_id = &record.question_id;

        let embedding =
            embedder
                .embed_tokens(&record.question)
                .map_err(|source| PipelineError::Embedding {
                    question_id: question_id.clone(),
                    source,
                })?;

        let rows = match *embedding.dims() {
            [rows, cols] if cols == expected_dim => rows,
            [_, cols] => {
                return Err(PipelineError::DimensionMismatch {
                    question_id: question_id.clone(),
                    expected: expected_dim,
                    found: cols,
                });
            }
            ref dims => {
                return Err(PipelineError::Storage {
                    question_id: question_id.clone(),
                    source: StorageError::UnexpectedShape {
                        path: store.path_for(question_id),
                        dims: dims.to_vec(),
                    },
                });
            }
        };

        let path = store
            .save(question_id, &embedding)
            .map_err(|source| PipelineError::Storage {
                question_id: question_id.clone(),
                source,
            })?;

        info!(question_id = %question_id, rows, "file saved");

        report.files_written += 1;
        report.total_rows += rows;
        report.max_len = report.max_len.max(rows);
        report.paths.push(path);
    }

    info!(
        files_written = report.files_written,
        total_rows = report.total_rows,
        max_len = report.max_len,
        "Generation complete"
    );

    Ok(report)
}

/// Re-loads every saved array and tracks the longest sequence.
///
/// A new maximum is logged whenever a length is greater than or equal to the running maximum.
pub fn validate_embeddings(
    records: &[QaRecord],
    store: &EmbeddingStore,
) -> PipelineResult<ValidationReport> {
    let mut report = ValidationReport::default();

    debug!(
        records = records.len(),
        output_dir = %store.root().display(),
        "Validating saved embeddings"
    );

    for record in records {
        let question_id = &record.question_id;

        let (len, dim) =
            store
                .shape_of(question_id)
                .map_err(|source| PipelineError::Storage {
                    question_id: question_id.clone(),
                    source,
                })?;

        match report.embedding_dim {
            None => report.embedding_dim = Some(dim),
            Some(expected) if expected != dim => {
                return Err(PipelineError::DimensionMismatch {
                    question_id: question_id.clone(),
                    expected,
                    found: dim,
                });
            }
            Some(_) => {}
        }

        report.files_checked += 1;

        if len >= report.max_len {
            report.max_len = len;
            report.longest_question = Some(question_id.clone());
            info!(max_len = len, question_id = %question_id, "current max length");
        }
    }

    info!(
        files_checked = report.files_checked,
        max_len = report.max_len,
        embedding_dim = ?report.embedding_dim,
        "Validation complete"
    );

    Ok(report)
}
