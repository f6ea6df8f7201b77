//! Local ONNX Runtime embedding provider.
//!
//! Runs all-MiniLM-L6-v2 via `ort`: tokenization, transformer inference,
//! attention-masked mean pooling, and L2 normalization. Model files live in
//! the configured cache directory and are fetched by `askdoc model download`.

use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::{EmbeddingProvider, EMBEDDING_DIM};
use crate::config::EmbeddingConfig;
use crate::error::{Result, RetrievalError};

/// Maximum sequence length for all-MiniLM-L6-v2 (trained at 256).
const MAX_SEQ_LEN: usize = 256;

/// Local ONNX-based embedding provider using all-MiniLM-L6-v2.
pub struct LocalEmbeddingProvider {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

// Safety: Tokenizer is Send+Sync. Session is behind a Mutex, which
// guarantees exclusive access during run().
unsafe impl Send for LocalEmbeddingProvider {}
unsafe impl Sync for LocalEmbeddingProvider {}

impl LocalEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let cache_dir = crate::config::expand_tilde(&config.cache_dir);
        let model_path = cache_dir.join("model.onnx");
        let tokenizer_path = cache_dir.join("tokenizer.json");

        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(RetrievalError::ModelUnavailable(format!(
                    "model file not found at {}. Run `askdoc model download` first.",
                    path.display()
                )));
            }
        }

        let session = Session::builder()
            .and_then(|b| {
                b.with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
                    .map_err(ort::Error::from)
            })
            .and_then(|b| b.with_intra_threads(4).map_err(ort::Error::from))
            .and_then(|mut b| b.commit_from_file(&model_path))
            .map_err(|e| RetrievalError::ModelUnavailable(format!("failed to load ONNX model: {e}")))?;

        tracing::info!(model = %model_path.display(), "ONNX model loaded");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| RetrievalError::ModelUnavailable(format!("failed to load tokenizer: {e}")))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| RetrievalError::ModelUnavailable(format!("failed to set truncation: {e}")))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            strategy: tokenizers::PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        tracing::info!(tokenizer = %tokenizer_path.display(), "tokenizer loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| RetrievalError::Encoding(format!("tokenization failed: {e}")))?;

        let batch_size = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        // Flatten the encodings into i64 input tensors.
        let mut input_ids = Vec::with_capacity(batch_size * seq_len);
        let mut attention_mask = Vec::with_capacity(batch_size * seq_len);
        for encoding in &encodings {
            input_ids.extend(encoding.get_ids().iter().map(|&id| id as i64));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
        }
        // token_type_ids: all zeros (single sentence, no segment B)
        let token_type_ids = vec![0i64; batch_size * seq_len];

        let shape = vec![batch_size as i64, seq_len as i64];
        let input_ids_tensor =
            Tensor::from_array((shape.clone(), input_ids.into_boxed_slice())).map_err(ort_err)?;
        let attention_mask_tensor =
            Tensor::from_array((shape.clone(), attention_mask.clone().into_boxed_slice()))
                .map_err(ort_err)?;
        let token_type_ids_tensor =
            Tensor::from_array((shape, token_type_ids.into_boxed_slice())).map_err(ort_err)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| RetrievalError::ModelUnavailable(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor,
            })
            .map_err(ort_err)?;

        // Token embeddings, shape [batch, seq_len, 384]. The output name
        // varies by ONNX export, so try the common names before index 0.
        let token_embeddings = outputs
            .get("token_embeddings")
            .or_else(|| outputs.get("last_hidden_state"))
            .unwrap_or_else(|| &outputs[0]);

        let (out_shape, data) = token_embeddings
            .try_extract_tensor::<f32>()
            .map_err(ort_err)?;

        let dims: &[i64] = &out_shape;
        if dims.len() != 3 || dims[2] != EMBEDDING_DIM as i64 {
            return Err(RetrievalError::ModelUnavailable(format!(
                "unexpected token_embeddings shape: {dims:?}, expected [batch, seq, {EMBEDDING_DIM}]"
            )));
        }
        let hidden_dim = dims[2] as usize;
        let actual_seq_len = dims[1] as usize;

        let mut results = Vec::with_capacity(batch_size);
        for b in 0..batch_size {
            let mask = &attention_mask[b * seq_len..b * seq_len + actual_seq_len];
            let tokens = &data[b * actual_seq_len * hidden_dim..(b + 1) * actual_seq_len * hidden_dim];
            let pooled = masked_mean(tokens, mask, hidden_dim);
            results.push(l2_normalize(&pooled));
        }

        Ok(results)
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}

fn ort_err(e: ort::Error) -> RetrievalError {
    RetrievalError::ModelUnavailable(format!("ONNX inference failed: {e}"))
}

/// Mean-pool token embeddings over the unmasked positions.
fn masked_mean(tokens: &[f32], mask: &[i64], hidden_dim: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_dim];
    let mut count = 0.0f32;

    for (s, &m) in mask.iter().enumerate() {
        if m > 0 {
            let row = &tokens[s * hidden_dim..(s + 1) * hidden_dim];
            for (acc, &x) in sum.iter_mut().zip(row) {
                *acc += x;
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for acc in &mut sum {
            *acc /= count;
        }
    }
    sum
}

/// L2-normalize a vector. Returns the input unchanged if its norm is zero.
fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}
