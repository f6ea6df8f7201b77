//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait and a local implementation using
//! all-MiniLM-L6-v2 (384 dimensions, L2-normalized). The provider is created
//! via [`create_provider`] from configuration and shared, read-only, between
//! the ingestion and query paths.

pub mod local;

use std::sync::Arc;

use crate::config::EmbeddingConfig;
use crate::error::{Result, RetrievalError};

/// Number of dimensions in the embedding vectors (all-MiniLM-L6-v2).
pub const EMBEDDING_DIM: usize = 384;

/// Trait for embedding text into vectors.
///
/// Implementations produce one vector per input string, order preserved, each
/// of exactly [`dimensions`](EmbeddingProvider::dimensions) length. The
/// dimension is fixed for the lifetime of the instance — the vector index
/// queries it once at construction to size its storage.
///
/// All methods are synchronous — callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string (the query path).
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text])?;
        batch.pop().ok_or_else(|| {
            RetrievalError::ModelUnavailable("provider returned an empty batch".into())
        })
    }

    /// Embed a batch of text strings (the ingestion path). Valid for any
    /// batch size, including zero (returns an empty vec) and one.
    ///
    /// Must never truncate the batch or substitute zero vectors on failure —
    /// a batch either embeds completely or the call errors.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize;
}

/// Create an embedding provider from config.
///
/// Currently only `"local"` is supported (ONNX Runtime + all-MiniLM-L6-v2).
/// Returns an error if model files are not found — run `askdoc model download`
/// first.
pub fn create_provider(config: &EmbeddingConfig) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "local" => {
            let provider = local::LocalEmbeddingProvider::new(config)?;
            Ok(Arc::new(provider))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: local"),
    }
}
