use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

use crate::constants::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE};

/// BERT-family encoder returning the last hidden layer for every token.
pub struct BertEncoder {
    model: BertModel,
    config: Config,
}

impl BertEncoder {
    /// Loads `config.json` + `model.safetensors` from `model_dir`.
    ///
    /// Checkpoints saved from task heads nest the encoder under `bert.` or `roberta.`;
    /// bare encoder checkpoints have no prefix.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join(MODEL_CONFIG_FILE);
        let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("roberta"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self { model, config })
    }

    /// Runs the encoder. Output shape: `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model
            .forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    pub fn max_position_embeddings(&self) -> usize {
        self.config.max_position_embeddings
    }
}
