//! Typed errors for the retrieval core.

use thiserror::Error;

/// Result alias for retrieval-core operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors surfaced by the embedding provider and the vector index.
///
/// Everything outside the retrieval core (file ingestion, the LLM call,
/// the CLI) uses `anyhow` and wraps these where they cross the boundary.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The embedding model could not be loaded, or inference failed.
    /// Fatal to the call that hit it; retrying is the caller's decision.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// Input text could not be tokenized.
    #[error("failed to encode text: {0}")]
    Encoding(String),

    /// A caller-supplied argument was rejected at the boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
