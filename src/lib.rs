//! Local document question answering.
//!
//! askdoc indexes document files into an in-memory vector index and answers
//! natural-language questions by retrieving the most relevant chunks and
//! grounding a Gemini call in them. Everything except the final LLM call
//! runs locally.
//!
//! # Architecture
//!
//! - **Embeddings**: Local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions)
//! - **Index**: Exact brute-force squared-L2 nearest-neighbor search over a
//!   flat in-memory embedding matrix, rebuilt per ingestion batch
//! - **Pipeline**: Ingestion, retrieval, and response agents exchanging a
//!   structured message envelope
//! - **Answers**: Gemini `generateContent` grounded in retrieved chunks
//!
//! The index is session-scoped: it is not persisted and there is no
//! incremental add — each ingestion replaces it wholesale.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`chunk`] — Recursive character text splitting
//! - [`ingest`] — Plain-text document reading
//! - [`embedding`] — Text-to-vector embedding pipeline via ONNX Runtime
//! - [`index`] — In-memory exact nearest-neighbor vector index
//! - [`agent`] — The ingestion/retrieval/response pipeline and message protocol
//! - [`llm`] — Gemini client for grounded answer generation
//! - [`error`] — Typed errors for the retrieval core

pub mod agent;
pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingest;
pub mod llm;
