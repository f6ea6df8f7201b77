//! Ingestion agent: file parsing and chunking.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::agent::protocol::{ChunksPayload, Message, MessageType};
use crate::agent::{INGESTION_AGENT, RETRIEVAL_AGENT};
use crate::chunk;
use crate::config::ChunkingConfig;
use crate::ingest;

/// Reads documents and splits them into chunks for indexing.
pub struct IngestionAgent {
    chunking: ChunkingConfig,
}

impl IngestionAgent {
    pub fn new(chunking: ChunkingConfig) -> Self {
        Self { chunking }
    }

    /// Parse every file, split into chunks, and emit a `DOCUMENT_CHUNKS`
    /// message carrying the combined ordered chunk list.
    ///
    /// Any unreadable file fails the whole batch — a partially ingested
    /// corpus would silently answer questions from half the documents.
    pub fn process_files(&self, paths: &[PathBuf]) -> Result<Message> {
        let mut all_chunks = Vec::new();

        for path in paths {
            let text = ingest::read_document(path)
                .with_context(|| format!("failed to ingest {}", path.display()))?;
            let chunks = chunk::split_text(&text, &self.chunking);
            info!(file = %path.display(), chunks = chunks.len(), "document chunked");
            all_chunks.extend(chunks);
        }

        info!(total_chunks = all_chunks.len(), files = paths.len(), "ingestion complete");

        let payload = ChunksPayload { chunks: all_chunks };
        Ok(Message::new(
            INGESTION_AGENT,
            RETRIEVAL_AGENT,
            MessageType::DocumentChunks,
            serde_json::to_value(payload)?,
        ))
    }
}
