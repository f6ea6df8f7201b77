//! Response agent: grounded answer generation via the LLM.

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::agent::protocol::{AnswerPayload, ContextPayload, Message, MessageType};
use crate::agent::RESPONSE_AGENT;
use crate::llm::GeminiClient;

/// Answer returned when retrieval found nothing to ground on. The LLM is
/// not called in that case — an ungrounded answer is worse than none.
pub const NO_CONTEXT_ANSWER: &str =
    "I could not find any relevant information in the uploaded documents to answer your question.";

/// Answer returned when the LLM call itself fails.
const LLM_ERROR_ANSWER: &str = "Sorry, I encountered an error while generating the response.";

/// Turns retrieved context plus the user's question into a final answer.
pub struct ResponseAgent {
    client: GeminiClient,
}

impl ResponseAgent {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Consume a `CONTEXT_RESPONSE` message and emit a `FINAL_ANSWER`.
    ///
    /// LLM failures do not propagate: the user gets an apologetic answer and
    /// the failure goes to the log. The sources list always reflects what
    /// retrieval actually returned.
    pub async fn generate_response(&self, message: &Message) -> Result<Message> {
        if message.msg_type != MessageType::ContextResponse {
            bail!(
                "response agent expected CONTEXT_RESPONSE, got {:?}",
                message.msg_type
            );
        }
        let context: ContextPayload = serde_json::from_value(message.payload.clone())
            .context("malformed CONTEXT_RESPONSE payload")?;

        info!(trace_id = %message.trace_id, query = %context.query, "generating answer");

        let answer = if context.top_chunks.is_empty() {
            NO_CONTEXT_ANSWER.to_string()
        } else {
            let prompt = build_prompt(&context.top_chunks, &context.query);
            match self.client.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "LLM call failed");
                    LLM_ERROR_ANSWER.to_string()
                }
            }
        };

        let payload = AnswerPayload {
            answer,
            sources: context.top_chunks,
        };
        Ok(Message::new(
            RESPONSE_AGENT,
            "UI",
            MessageType::FinalAnswer,
            serde_json::to_value(payload)?,
        ))
    }
}

/// Build the context-grounded prompt. The model is told to answer only from
/// the provided passages.
fn build_prompt(chunks: &[String], query: &str) -> String {
    let context = chunks.join("\n---\n");
    format!(
        "You are a helpful assistant. Answer the user's question based *only* on the provided context.\n\
         If the answer is not found in the context, say \"I could not find the answer in the provided documents.\"\n\
         \n\
         CONTEXT:\n{context}\n\
         \n\
         QUESTION:\n{query}\n\
         \n\
         ANSWER:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_context_and_question() {
        let chunks = vec!["first passage".to_string(), "second passage".to_string()];
        let prompt = build_prompt(&chunks, "what is this?");
        assert!(prompt.contains("first passage\n---\nsecond passage"));
        assert!(prompt.contains("QUESTION:\nwhat is this?"));
        assert!(prompt.contains("based *only* on the provided context"));
    }
}
