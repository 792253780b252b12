//! Local ONNX Runtime embedding provider.
//!
//! Runs all-MiniLM-L6-v2 through `ort`: tokenize the batch, run the
//! transformer, mean-pool token embeddings under the attention mask, and
//! L2-normalize the result.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ndarray::ArrayView3;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::{EmbeddingProvider, EMBEDDING_DIM};
use crate::config::EmbeddingConfig;

/// Maximum sequence length for all-MiniLM-L6-v2 (trained at 256).
const MAX_SEQ_LEN: usize = 256;

/// ONNX-based embedding provider for all-MiniLM-L6-v2.
pub struct OnnxEmbedder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

// Safety: Tokenizer is Send+Sync. Session is behind a Mutex.
// The Mutex guarantees exclusive access during run().
unsafe impl Send for OnnxEmbedder {}
unsafe impl Sync for OnnxEmbedder {}

/// Tokenized batch flattened for tensor construction, all rows padded to one
/// length.
struct TokenBatch {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    rows: usize,
    seq_len: usize,
}

impl OnnxEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let cache_dir = crate::config::expand_tilde(&config.cache_dir);
        let session = load_session(&cache_dir.join("model.onnx"))?;
        let tokenizer = load_tokenizer(&cache_dir.join("tokenizer.json"))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    fn tokenize(&self, texts: &[&str]) -> Result<TokenBatch> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenization failed: {e}"))?;

        let rows = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        let mut input_ids = Vec::with_capacity(rows * seq_len);
        let mut attention_mask = Vec::with_capacity(rows * seq_len);
        for encoding in &encodings {
            input_ids.extend(encoding.get_ids().iter().map(|&id| id as i64));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
        }

        Ok(TokenBatch {
            input_ids,
            attention_mask,
            rows,
            seq_len,
        })
    }
}

impl EmbeddingProvider for OnnxEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text])?;
        Ok(results.into_iter().next().expect("batch had one input"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let batch = self.tokenize(texts)?;
        let shape = vec![batch.rows as i64, batch.seq_len as i64];

        let input_ids =
            Tensor::from_array((shape.clone(), batch.input_ids.into_boxed_slice()))?;
        let attention =
            Tensor::from_array((shape.clone(), batch.attention_mask.clone().into_boxed_slice()))?;
        // token_type_ids: all zeros (single sentence, no segment B)
        let token_types = Tensor::from_array((
            shape,
            vec![0i64; batch.rows * batch.seq_len].into_boxed_slice(),
        ))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;

        let outputs = session.run(ort::inputs! {
            "input_ids" => input_ids,
            "attention_mask" => attention,
            "token_type_ids" => token_types,
        })?;

        // Token embeddings come back as [batch, seq, 384]. The output name
        // varies by ONNX export, so try the common ones before index 0.
        let token_value = outputs
            .get("token_embeddings")
            .or_else(|| outputs.get("last_hidden_state"))
            .unwrap_or_else(|| &outputs[0]);

        let (out_shape, data) = token_value
            .try_extract_tensor::<f32>()
            .context("failed to extract token embeddings tensor")?;

        let dims: &[i64] = &out_shape;
        anyhow::ensure!(
            dims.len() == 3 && dims[2] == EMBEDDING_DIM as i64,
            "unexpected token embeddings shape: {dims:?}, expected [batch, seq, {EMBEDDING_DIM}]"
        );

        let token_embeddings = ArrayView3::from_shape(
            (dims[0] as usize, dims[1] as usize, dims[2] as usize),
            data,
        )
        .context("token embeddings tensor is not contiguous")?;

        Ok(mean_pool(&token_embeddings, &batch.attention_mask, batch.seq_len))
    }
}

fn load_session(model_path: &Path) -> Result<Session> {
    anyhow::ensure!(
        model_path.exists(),
        "ONNX model not found at {}. Run `fieldmap model download` first.",
        model_path.display()
    );

    let session = Session::builder()?
        .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
        .with_intra_threads(4)?
        .commit_from_file(model_path)
        .context("failed to load ONNX model")?;

    tracing::info!(model = %model_path.display(), "ONNX model loaded");
    Ok(session)
}

fn load_tokenizer(tokenizer_path: &Path) -> Result<Tokenizer> {
    anyhow::ensure!(
        tokenizer_path.exists(),
        "Tokenizer not found at {}. Run `fieldmap model download` first.",
        tokenizer_path.display()
    );

    let mut tokenizer = Tokenizer::from_file(tokenizer_path)
        .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

    tokenizer
        .with_truncation(Some(tokenizers::TruncationParams {
            max_length: MAX_SEQ_LEN,
            ..Default::default()
        }))
        .map_err(|e| anyhow::anyhow!("failed to set truncation: {e}"))?;

    tokenizer.with_padding(Some(tokenizers::PaddingParams {
        strategy: tokenizers::PaddingStrategy::BatchLongest,
        ..Default::default()
    }));

    tracing::info!(tokenizer = %tokenizer_path.display(), "tokenizer loaded");
    Ok(tokenizer)
}

/// Masked mean pooling over the sequence axis, then L2 normalization.
///
/// Padding positions (mask 0) contribute nothing to the mean. The mask is
/// indexed with the padded `seq_len` the tokenizer produced, which matches
/// the model's output sequence axis.
fn mean_pool(
    token_embeddings: &ArrayView3<'_, f32>,
    attention_mask: &[i64],
    seq_len: usize,
) -> Vec<Vec<f32>> {
    let (rows, out_seq, hidden) = token_embeddings.dim();
    let mut pooled = Vec::with_capacity(rows);

    for b in 0..rows {
        let mut sum = vec![0.0f32; hidden];
        let mut tokens = 0.0f32;

        for s in 0..out_seq {
            if attention_mask[b * seq_len + s] == 0 {
                continue;
            }
            let token = token_embeddings.slice(ndarray::s![b, s, ..]);
            for (acc, &value) in sum.iter_mut().zip(token.iter()) {
                *acc += value;
            }
            tokens += 1.0;
        }

        if tokens > 0.0 {
            for value in &mut sum {
                *value /= tokens;
            }
        }

        pooled.push(l2_normalize(&sum));
    }

    pooled
}

/// L2-normalize a vector. Returns a zero vector if the input norm is zero.
fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}
