//! Command-line surface of the `qembed` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "qembed",
    version,
    about = "Embed QA questions token-by-token and save one .npy array per question"
)]
pub struct Cli {
    /// QA record file (overrides QEMBED_INPUT_PATH).
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Output directory for `<question_id>.npy` (overrides QEMBED_OUTPUT_DIR).
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Model directory with config.json, tokenizer.json, model.safetensors (overrides QEMBED_MODEL_DIR).
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// Max tokens per question (overrides QEMBED_MAX_SEQ_LEN).
    #[arg(long, global = true)]
    pub max_seq_len: Option<usize>,

    /// Keep [CLS]/[SEP] rows in the saved arrays.
    #[arg(long, global = true, overrides_with = "no_keep_special_tokens")]
    pub keep_special_tokens: bool,

    /// Drop [CLS]/[SEP] rows even if QEMBED_KEEP_SPECIAL_TOKENS is set.
    #[arg(long, global = true, overrides_with = "keep_special_tokens")]
    pub no_keep_special_tokens: bool,

    /// Run on the CPU without looking for a GPU.
    #[arg(long, global = true, overrides_with = "no_force_cpu")]
    pub force_cpu: bool,

    /// Allow GPU selection even if QEMBED_FORCE_CPU is set.
    #[arg(long, global = true, overrides_with = "force_cpu")]
    pub no_force_cpu: bool,

    /// Use the deterministic model-free embedder (testing only).
    #[arg(long, global = true)]
    pub stub: bool,

    #[command(subcommand)]
    pub step: Option<Step>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Embed every question and save its array.
    Generate,
    /// Re-load saved arrays and report the longest sequence.
    Validate,
    /// Generate, then validate.
    Run,
}

impl Cli {
    /// Selected step; `run` when none was given.
    pub fn step(&self) -> Step {
        self.step.unwrap_or(Step::Run)
    }

    /// Layers command-line flags over an env-derived config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input {
            config.input_path = input.clone();
        }
        if let Some(ref output_dir) = self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(ref model_dir) = self.model_dir {
            config.model_dir = Some(model_dir.clone());
        }
        if let Some(max_seq_len) = self.max_seq_len {
            config.max_seq_len = max_seq_len;
        }
        if let Some(keep) = switch(self.keep_special_tokens, self.no_keep_special_tokens) {
            config.keep_special_tokens = keep;
        }
        if let Some(force_cpu) = switch(self.force_cpu, self.no_force_cpu) {
            config.force_cpu = force_cpu;
        }
        config
    }
}

/// `--flag` / `--no-flag` pair; `None` leaves the env value alone. clap keeps only the last one given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
