//! Retrieval agent: owns the vector index.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::agent::protocol::{ChunksPayload, ContextPayload, Message, MessageType};
use crate::agent::{RESPONSE_AGENT, RETRIEVAL_AGENT};
use crate::embedding::EmbeddingProvider;
use crate::index::VectorIndex;

/// Builds the vector index from ingested chunks and retrieves context for
/// queries. Sole owner of the [`VectorIndex`].
pub struct RetrievalAgent {
    index: VectorIndex,
    top_k: usize,
}

impl RetrievalAgent {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, top_k: usize) -> Self {
        Self {
            index: VectorIndex::new(provider),
            top_k,
        }
    }

    /// Accept a `DOCUMENT_CHUNKS` message and (re)build the index from its
    /// chunks. Returns the number of chunks received.
    pub fn handle_ingestion(&mut self, message: &Message) -> Result<usize> {
        if message.msg_type != MessageType::DocumentChunks {
            bail!(
                "retrieval agent expected DOCUMENT_CHUNKS, got {:?}",
                message.msg_type
            );
        }
        let payload: ChunksPayload = serde_json::from_value(message.payload.clone())
            .context("malformed DOCUMENT_CHUNKS payload")?;

        info!(trace_id = %message.trace_id, chunks = payload.chunks.len(), "indexing chunks");
        self.index.build(&payload.chunks)?;
        Ok(payload.chunks.len())
    }

    /// Search the index for `query` and emit a `CONTEXT_RESPONSE` with the
    /// top chunks. An index that was never built yields empty context, not
    /// an error.
    pub fn retrieve_context(&self, query: &str) -> Result<Message> {
        let top_chunks = self
            .index
            .search(query, self.top_k)
            .context("context retrieval failed")?;

        info!(hits = top_chunks.len(), "context retrieved");

        let payload = ContextPayload {
            top_chunks,
            query: query.to_string(),
        };
        Ok(Message::new(
            RETRIEVAL_AGENT,
            RESPONSE_AGENT,
            MessageType::ContextResponse,
            serde_json::to_value(payload)?,
        ))
    }

    /// Whether the index has been built with at least one chunk.
    pub fn is_ready(&self) -> bool {
        self.index.is_ready()
    }

    /// Number of indexed chunks.
    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }
}
