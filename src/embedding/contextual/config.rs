use std::path::PathBuf;

use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, MODEL_CONFIG_FILE, MODEL_TOKENIZER_FILE,
    MODEL_WEIGHTS_FILE,
};
use crate::embedding::error::EmbeddingError;

/// Smallest `max_seq_len` that fits `[CLS]` + `[SEP]`.
pub const MIN_SEQ_LEN_WITH_SPECIAL: usize = 2;

#[derive(Debug, Clone)]
/// Configuration for [`ContextualEmbedder`](super::ContextualEmbedder).
pub struct ContextualConfig {
    /// Directory with `config.json`, `tokenizer.json` and `model.safetensors`.
    pub model_dir: PathBuf,
    /// Max tokens per question; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Row width in stub mode. Model mode always uses the encoder's hidden size.
    pub embedding_dim: usize,
    /// Keep `[CLS]`/`[SEP]` rows.
    pub keep_special_tokens: bool,
    /// Skip GPU probing.
    pub force_cpu: bool,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for ContextualConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            keep_special_tokens: false,
            force_cpu: false,
            testing_stub: false,
        }
    }
}

impl ContextualConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for the selected mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        // [CLS] and [SEP] alone take two positions; the tokenizer always adds them.
        let adds_special = self.keep_special_tokens || !self.testing_stub;
        if adds_special && self.max_seq_len < MIN_SEQ_LEN_WITH_SPECIAL {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "max_seq_len ({}) must be at least {} when special tokens are added",
                    self.max_seq_len, MIN_SEQ_LEN_WITH_SPECIAL
                ),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be greater than zero".to_string(),
                });
            }
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Returns the first missing model file, if any.
    pub fn missing_model_file(&self) -> Option<PathBuf> {
        [MODEL_CONFIG_FILE, MODEL_TOKENIZER_FILE, MODEL_WEIGHTS_FILE]
            .iter()
            .map(|name| self.model_dir.join(name))
            .find(|path| !path.is_file())
    }

    /// Returns `true` if all three model files exist.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.missing_model_file().is_none()
    }
}
