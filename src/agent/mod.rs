//! The agent pipeline: ingestion → retrieval → response.
//!
//! Three agents cooperate over a structured [`protocol::Message`] envelope,
//! mirroring the classic RAG shape: the ingestion agent turns files into
//! chunks, the retrieval agent indexes them and finds context for a query,
//! and the response agent grounds an LLM answer in that context.
//! [`Pipeline`] wires the three together for a single-session caller.

pub mod ingestion;
pub mod protocol;
pub mod response;
pub mod retrieval;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::agent::protocol::AnswerPayload;
use crate::config::AskdocConfig;
use crate::embedding::EmbeddingProvider;
use crate::llm::GeminiClient;

pub const INGESTION_AGENT: &str = "IngestionAgent";
pub const RETRIEVAL_AGENT: &str = "RetrievalAgent";
pub const RESPONSE_AGENT: &str = "ResponseAgent";

/// A grounded answer plus the chunks it was grounded on.
#[derive(Debug)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

/// One in-memory question-answering session.
///
/// Built once per process; the index lives only as long as the pipeline.
pub struct Pipeline {
    ingestion: ingestion::IngestionAgent,
    retrieval: retrieval::RetrievalAgent,
    response: response::ResponseAgent,
}

impl Pipeline {
    /// Assemble the pipeline around a shared embedding provider.
    pub fn new(config: &AskdocConfig, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            ingestion: ingestion::IngestionAgent::new(config.chunking.clone()),
            retrieval: retrieval::RetrievalAgent::new(provider, config.retrieval.top_k),
            response: response::ResponseAgent::new(GeminiClient::new(&config.llm)),
        }
    }

    /// Ingest `paths` and build the index. Returns the number of chunks
    /// indexed.
    pub fn ingest(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let message = self.ingestion.process_files(paths)?;
        self.retrieval
            .handle_ingestion(&message)
            .context("failed to index document chunks")
    }

    /// Answer one question against the current index.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let context = self.retrieval.retrieve_context(question)?;
        let final_message = self.response.generate_response(&context).await?;
        let payload: AnswerPayload = serde_json::from_value(final_message.payload)
            .context("malformed FINAL_ANSWER payload")?;
        Ok(Answer {
            text: payload.answer,
            sources: payload.sources,
        })
    }

    /// Whether any chunks are indexed yet.
    pub fn is_ready(&self) -> bool {
        self.retrieval.is_ready()
    }
}
