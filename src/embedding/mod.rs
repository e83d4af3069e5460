//! Embedding + model utilities.
//!
//! - [`contextual`] turns a question into one vector per token.
//! - [`SequenceEmbedder`] is the seam the pipeline depends on.

/// BERT encoder wrapper.
pub mod bert;
/// Contextual (per-token) embedder.
pub mod contextual;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod utils;

pub use contextual::{ContextualConfig, ContextualEmbedder};
pub use error::EmbeddingError;

use candle_core::Tensor;

/// Anything that maps text to a `(sequence_len, embedding_dim)` f32 tensor on the CPU.
pub trait SequenceEmbedder {
    /// Embeds `text`, one row per token.
    fn embed_tokens(&self, text: &str) -> Result<Tensor, EmbeddingError>;

    /// Width of every returned row.
    fn embedding_dim(&self) -> usize;
}
