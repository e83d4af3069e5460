//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QEMBED_*` environment variables, then with
//! command-line flags (see [`crate::cli`]).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_MAX_SEQ_LEN, DEFAULT_OUTPUT_DIR};
use crate::embedding::ContextualConfig;

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QEMBED_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// QA record file (JSON array). Default: `data/jsons/QA.json`.
    pub input_path: PathBuf,

    /// Directory receiving one `<question_id>.npy` per record. Default: `data/ques_embeddings/bert`.
    pub output_dir: PathBuf,

    /// Directory with `config.json`, `tokenizer.json` and `model.safetensors`.
    pub model_dir: Option<PathBuf>,

    /// Tokens kept per question after truncation. Default: `512`.
    pub max_seq_len: usize,

    /// Keep `[CLS]`/`[SEP]` rows in the saved arrays. Default: `false`.
    pub keep_special_tokens: bool,

    /// Skip GPU probing even when a GPU backend is compiled in. Default: `false`.
    pub force_cpu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            keep_special_tokens: false,
            force_cpu: false,
        }
    }
}

impl Config {
    pub const ENV_INPUT_PATH: &'static str = "QEMBED_INPUT_PATH";
    pub const ENV_OUTPUT_DIR: &'static str = "QEMBED_OUTPUT_DIR";
    pub const ENV_MODEL_DIR: &'static str = "QEMBED_MODEL_DIR";
    pub const ENV_MAX_SEQ_LEN: &'static str = "QEMBED_MAX_SEQ_LEN";
    pub const ENV_KEEP_SPECIAL_TOKENS: &'static str = "QEMBED_KEEP_SPECIAL_TOKENS";
    pub const ENV_FORCE_CPU: &'static str = "QEMBED_FORCE_CPU";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let input_path = Self::parse_path_from_env(Self::ENV_INPUT_PATH, defaults.input_path);
        let output_dir = Self::parse_path_from_env(Self::ENV_OUTPUT_DIR, defaults.output_dir);
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let max_seq_len = Self::parse_usize_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;
        let keep_special_tokens =
            Self::parse_bool_from_env(Self::ENV_KEEP_SPECIAL_TOKENS, defaults.keep_special_tokens)?;
        let force_cpu = Self::parse_bool_from_env(Self::ENV_FORCE_CPU, defaults.force_cpu)?;

        Ok(Self {
            input_path,
            output_dir,
            model_dir,
            max_seq_len,
            keep_special_tokens,
            force_cpu,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_seq_len == 0 {
            return Err(ConfigError::ZeroMaxSeqLen);
        }

        if !self.input_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.input_path.clone(),
            });
        }
        if !self.input_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.input_path.clone(),
            });
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.output_dir.clone(),
            });
        }

        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Builds the embedder configuration. `stub` selects the model-free backend.
    pub fn embedder_config(&self, stub: bool) -> Result<ContextualConfig, ConfigError> {
        let base = if stub {
            ContextualConfig::stub()
        } else {
            let model_dir = self.model_dir.clone().ok_or(ConfigError::MissingModelDir)?;
            ContextualConfig::new(model_dir)
        };

        Ok(ContextualConfig {
            max_seq_len: self.max_seq_len,
            keep_special_tokens: self.keep_special_tokens,
            force_cpu: self.force_cpu,
            ..base
        })
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(default);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            "" => Ok(default),
            _ => Err(ConfigError::InvalidBool {
                name: var_name,
                value,
            }),
        }
    }
}
