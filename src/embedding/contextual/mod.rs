//! Contextual embedder: one vector per token of a question.
//!
//! Use [`ContextualConfig::stub`] for tests/dry runs without model files.

/// Contextual embedder configuration.
pub mod config;


pub use config::{ContextualConfig, MIN_SEQ_LEN_WITH_SPECIAL};

use candle_core::{DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::SequenceEmbedder;
use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;
use crate::hashing::token_seed;

const STUB_CLS_TOKEN: &str = "[CLS]";
const STUB_SEP_TOKEN: &str = "[SEP]";

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Produces `(sequence_len, embedding_dim)` f32 arrays, one row per token.
pub struct ContextualEmbedder {
    backend: EmbedderBackend,
    config: ContextualConfig,
    embedding_dim: usize,
}

impl std::fmt::Debug for ContextualEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextualEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .field("keep_special_tokens", &self.config.keep_special_tokens)
            .finish()
    }
}

impl ContextualEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: ContextualConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Contextual embedder running in STUB mode (testing only)");
            let embedding_dim = config.embedding_dim;
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
                embedding_dim,
            });
        }

        if let Some(path) = config.missing_model_file() {
            return Err(EmbeddingError::ModelNotFound { path });
        }

        let device = select_device(config.force_cpu);
        debug!(?device, "Selected compute device for encoder");

        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len)?;

        let encoder = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        if config.max_seq_len > encoder.max_position_embeddings() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "max_seq_len ({}) exceeds model max_position_embeddings ({})",
                    config.max_seq_len,
                    encoder.max_position_embeddings()
                ),
            });
        }

        let embedding_dim = encoder.hidden_size();

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            keep_special_tokens = config.keep_special_tokens,
            "Encoder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            },
            config,
            embedding_dim,
        })
    }

    /// Embeds `text`, returning one row per token.
    pub fn embed(&self, text: &str) -> Result<Tensor, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => self.embed_stub(text),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Tensor, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let token_ids = encoding.get_ids();
        let content_rows: Vec<u32> = encoding
            .get_special_tokens_mask()
            .iter()
            .enumerate()
            .filter(|(_, special)| **special == 0)
            .map(|(idx, _)| idx as u32)
            .collect();

        // Only [CLS]/[SEP] is still an empty question, whichever rows are kept.
        if content_rows.is_empty() {
            return Err(EmbeddingError::EmptySequence);
        }

        let rows: Vec<u32> = if self.config.keep_special_tokens {
            (0..token_ids.len() as u32).collect()
        } else {
            content_rows
        };

        debug!(
            text_len = text.len(),
            token_count = token_ids.len(),
            kept_rows = rows.len(),
            "Running encoder forward pass"
        );

        let input_ids = Tensor::new(token_ids, device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden] -> [seq_len, hidden]
        let hidden_states = encoder
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?
            .squeeze(0)?;

        let row_index = Tensor::new(rows.as_slice(), device)?;
        let embeddings = hidden_states
            .index_select(&row_index, 0)?
            .to_dtype(DType::F32)?
            .to_device(&Device::Cpu)?;

        Ok(embeddings)
    }

    fn embed_stub(&self, text: &str) -> Result<Tensor, EmbeddingError> {
        let keep_special = self.config.keep_special_tokens;
        let reserved = if keep_special {
            MIN_SEQ_LEN_WITH_SPECIAL
        } else {
            0
        };

        let mut tokens = stub_tokens(text);
        if tokens.is_empty() {
            return Err(EmbeddingError::EmptySequence);
        }

        // validate() guarantees max_seq_len >= 2 when special rows are kept.
        tokens.truncate(self.config.max_seq_len - reserved);
        if keep_special {
            tokens.insert(0, STUB_CLS_TOKEN);
            tokens.push(STUB_SEP_TOKEN);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating stub embedding"
        );

        let dim = self.embedding_dim;
        let mut data = Vec::with_capacity(tokens.len() * dim);

        for (position, token) in tokens.iter().enumerate() {
            let start = data.len();
            let mut state = token_seed(text, position, token);

            for _ in 0..dim {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
                data.push(value);
            }

            normalize(&mut data[start..]);
        }

        Ok(Tensor::from_vec(data, (tokens.len(), dim), &Device::Cpu)?)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &ContextualConfig {
        &self.config
    }
}

impl SequenceEmbedder for ContextualEmbedder {
    fn embed_tokens(&self, text: &str) -> Result<Tensor, EmbeddingError> {
        self.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

/// Word/punctuation split used by the stub backend.
pub(crate) fn stub_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for word in text.split_whitespace() {
        let mut start = 0;
        for (idx, ch) in word.char_indices() {
            if !ch.is_alphanumeric() {
                if start < idx {
                    tokens.push(&word[start..idx]);
                }
                let end = idx + ch.len_utf8();
                tokens.push(&word[idx..end]);
                start = end;
            }
        }
        if start < word.len() {
            tokens.push(&word[start..]);
        }
    }

    tokens
}

fn normalize(row: &mut [f32]) {
    let norm: f32 = row.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in row {
            *x /= norm;
        }
    }
}
