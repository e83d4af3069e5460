//! Contextual question embeddings (library crate used by the `qembed` binary and tests).
//!
//! # Flow
//!
//! 1. [`dataset::load_records`] reads the QA record file.
//! 2. [`pipeline::generate_embeddings`] embeds each question with a [`SequenceEmbedder`] and
//!    writes one `(sequence_len, embedding_dim)` f32 `.npy` array per question through
//!    [`EmbeddingStore`].
//! 3. [`pipeline::validate_embeddings`] re-loads the arrays and reports the longest sequence.
//!
//! ## Embedding
//! - [`ContextualEmbedder`], [`ContextualConfig`] - BERT encoder or deterministic stub
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `QEMBED_*` environment settings
//! - [`cli::Cli`] - command-line overrides

pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod hashing;
pub mod pipeline;
pub mod storage;

pub use config::{Config, ConfigError};
pub use dataset::{DatasetError, QaRecord, QuestionId, load_records, parse_records};
pub use embedding::{ContextualConfig, ContextualEmbedder, EmbeddingError, SequenceEmbedder};
pub use pipeline::{
    GenerationReport, PipelineError, PipelineResult, ValidationReport, generate_embeddings,
    validate_embeddings,
};
pub use storage::{EmbeddingStore, StorageError, StorageResult};
