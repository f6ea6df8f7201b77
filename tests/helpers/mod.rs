#![allow(dead_code)]

use std::collections::HashMap;

use askdoc::embedding::EmbeddingProvider;
use askdoc::error::{Result, RetrievalError};

/// Deterministic embedding provider for tests.
///
/// Texts registered via [`with_vector`](MockProvider::with_vector) get fixed
/// vectors; anything else gets a deterministic vector derived from its bytes.
/// A poisoned text makes any batch containing it fail, for exercising the
/// atomic-build contract.
pub struct MockProvider {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    poison: Option<String>,
}

impl MockProvider {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: HashMap::new(),
            poison: None,
        }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dim, "fixture vector has wrong dimension");
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn with_poison(mut self, text: &str) -> Self {
        self.poison = Some(text.to_string());
        self
    }

    fn vector_for(&self, text: &str) -> Result<Vec<f32>> {
        if self.poison.as_deref() == Some(text) {
            return Err(RetrievalError::ModelUnavailable(
                "mock provider poisoned input".into(),
            ));
        }
        if let Some(v) = self.vectors.get(text) {
            return Ok(v.clone());
        }
        // Deterministic fallback: spread the bytes over the dimensions.
        let mut v = vec![0.0f32; self.dim];
        for (i, b) in text.bytes().enumerate() {
            v[i % self.dim] += b as f32;
        }
        Ok(v)
    }
}

impl EmbeddingProvider for MockProvider {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.vector_for(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dim
    }
}

/// Owned-string helper so tests can write chunk lists tersely.
pub fn chunks(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}
