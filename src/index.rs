//! In-memory vector index over document chunks.
//!
//! A flat, exact k-nearest-neighbor index: embeddings live in one contiguous
//! `N x D` row-major buffer with a parallel array of source chunks, addressed
//! by slot. For every slot `i`, `chunks[i]` is the exact text that produced
//! row `i` of the embedding buffer — that co-indexing is the structural
//! invariant everything here protects.
//!
//! Search is a brute-force squared-L2 scan with a partial sort for the top-k.
//! O(N*D) per query, which is the right tradeoff for a handful of documents'
//! worth of chunks; an approximate structure only becomes interesting past
//! low tens of thousands of slots.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};

/// Exact nearest-neighbor index over (embedding, chunk) pairs.
///
/// `build` takes `&mut self` and `search` takes `&self`, so the exclusive
/// rebuild / shared read discipline is enforced by the borrow checker; a
/// caller sharing one index across tasks wraps it in an `RwLock`.
pub struct VectorIndex {
    provider: Arc<dyn EmbeddingProvider>,
    dim: usize,
    /// Flat `N x D` embedding matrix, row per slot.
    embeddings: Vec<f32>,
    /// Source text per slot, co-indexed with `embeddings` rows.
    chunks: Vec<String>,
}

impl VectorIndex {
    /// Create an empty index bound to an embedding provider.
    ///
    /// The provider's dimension is queried once here and fixed for the
    /// lifetime of the index.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        let dim = provider.dimensions();
        Self {
            provider,
            dim,
            embeddings: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether a successful non-empty build has happened.
    pub fn is_ready(&self) -> bool {
        !self.chunks.is_empty()
    }

    /// Embedding dimension this index stores.
    pub fn dimensions(&self) -> usize {
        self.dim
    }

    /// Embed `chunks` and replace the index contents with them.
    ///
    /// An empty batch is a silent no-op that leaves any existing index
    /// untouched — a rebuild with nothing in it must not destroy a good
    /// index. Note the asymmetry with the non-empty case, which is a full
    /// replace, never a merge.
    ///
    /// The build is atomic: chunks are embedded into staging storage first
    /// and committed only after the whole batch succeeded. On any failure
    /// the prior contents stay authoritative.
    pub fn build(&mut self, chunks: &[String]) -> Result<()> {
        if chunks.is_empty() {
            debug!("empty chunk batch — keeping existing index");
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = self.provider.embed_batch(&texts)?;
        if vectors.len() != chunks.len() {
            return Err(RetrievalError::ModelUnavailable(format!(
                "provider returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let mut matrix = Vec::with_capacity(chunks.len() * self.dim);
        for vector in &vectors {
            if vector.len() != self.dim {
                return Err(RetrievalError::ModelUnavailable(format!(
                    "provider returned a {}-dim vector, expected {}",
                    vector.len(),
                    self.dim
                )));
            }
            matrix.extend_from_slice(vector);
        }

        self.embeddings = matrix;
        self.chunks = chunks.to_vec();
        info!(chunks = self.chunks.len(), dim = self.dim, "vector index built");
        Ok(())
    }

    /// Return the `k` indexed chunks closest to `query`, most relevant first.
    ///
    /// Distance is squared Euclidean with no normalization applied by the
    /// index — ranking coincides with cosine only when the provider emits
    /// L2-normalized vectors (the local provider does). Ties are broken by
    /// ascending slot so results are deterministic. `k` greater than the
    /// index size is clamped, and searching an index that was never built
    /// returns an empty vec rather than an error: querying before ingestion
    /// is an expected transient state.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        if k == 0 {
            return Err(RetrievalError::InvalidArgument(
                "k must be at least 1".into(),
            ));
        }
        if !self.is_ready() {
            debug!("search before index build — returning no results");
            return Ok(Vec::new());
        }

        let query_vec = self.provider.embed(query)?;
        if query_vec.len() != self.dim {
            return Err(RetrievalError::ModelUnavailable(format!(
                "provider returned a {}-dim query vector, expected {}",
                query_vec.len(),
                self.dim
            )));
        }

        let mut ranked: Vec<(f32, usize)> = self
            .embeddings
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(slot, row)| (squared_l2(row, &query_vec), slot))
            .collect();

        let k = k.min(ranked.len());
        if k < ranked.len() {
            ranked.select_nth_unstable_by(k - 1, cmp_hits);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(cmp_hits);

        debug!(k, nearest = ?ranked.first(), "search complete");
        Ok(ranked
            .into_iter()
            .map(|(_, slot)| self.chunks[slot].clone())
            .collect())
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Order hits by distance, then slot. The slot tiebreak makes the ordering
/// total, so equal distances resolve deterministically.
fn cmp_hits(a: &(f32, usize), b: &(f32, usize)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_l2_basics() {
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn hits_order_by_distance_then_slot() {
        let mut hits = vec![(2.0, 0), (1.0, 5), (1.0, 2), (0.5, 9)];
        hits.sort_unstable_by(cmp_hits);
        assert_eq!(hits, vec![(0.5, 9), (1.0, 2), (1.0, 5), (2.0, 0)]);
    }
}
