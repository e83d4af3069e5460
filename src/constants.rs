//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants (e.g. temp-file suffixes) from primary ones to avoid drift.

/// Row width produced by the stub embedder. Model-backed runs use the encoder's `hidden_size`.
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;

/// Maximum tokens fed to the encoder per question (BERT position-embedding limit).
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Extension of saved per-question arrays.
pub const EMBEDDING_FILE_EXTENSION: &str = "npy";

/// Extension used while an array is being written.
pub const TEMP_FILE_EXTENSION: &str = "npy.tmp";

/// Default location of the QA record file.
pub const DEFAULT_INPUT_PATH: &str = "data/jsons/QA.json";

/// Default directory for saved arrays.
pub const DEFAULT_OUTPUT_DIR: &str = "data/ques_embeddings/bert";

/// Files expected inside a model directory.
pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_TOKENIZER_FILE: &str = "tokenizer.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
