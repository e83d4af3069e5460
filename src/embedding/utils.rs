use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use crate::constants::MODEL_TOKENIZER_FILE;
use crate::embedding::error::EmbeddingError;

/// Loads `tokenizer.json` from a model directory, truncating to `max_len` and without padding.
///
/// Padding is disabled so every encoded position is a real token; the encoder output rows then
/// map one-to-one onto the question's tokens.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let tokenizer_path = model_dir.join(MODEL_TOKENIZER_FILE);

    let mut tokenizer =
        Tokenizer::from_file(&tokenizer_path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to load {}: {}", tokenizer_path.display(), e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}
