//! Structured message envelope passed between pipeline agents.
//!
//! Every hop in the pipeline is a [`Message`] tagged with sender, receiver,
//! a typed kind, and a trace id, so a whole question's journey can be
//! followed through the logs. Payloads are JSON values with typed
//! projections for each message kind.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of message exchanged between agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// Ingestion → retrieval: chunks ready for indexing.
    DocumentChunks,
    /// Retrieval → response: top chunks for a query.
    ContextResponse,
    /// Response → caller: the grounded answer.
    FinalAnswer,
    Error,
}

/// One message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub receiver: String,
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    pub trace_id: Uuid,
    pub payload: serde_json::Value,
}

impl Message {
    /// Build a message with a fresh trace id.
    pub fn new(
        sender: &str,
        receiver: &str,
        msg_type: MessageType,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            msg_type,
            trace_id: Uuid::new_v4(),
            payload,
        }
    }
}

/// Payload of a [`MessageType::DocumentChunks`] message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunksPayload {
    pub chunks: Vec<String>,
}

/// Payload of a [`MessageType::ContextResponse`] message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPayload {
    pub top_chunks: Vec<String>,
    pub query: String,
}

/// Payload of a [`MessageType::FinalAnswer`] message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_get_distinct_trace_ids() {
        let a = Message::new("a", "b", MessageType::DocumentChunks, serde_json::json!({}));
        let b = Message::new("a", "b", MessageType::DocumentChunks, serde_json::json!({}));
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn message_type_serializes_screaming() {
        let json = serde_json::to_string(&MessageType::ContextResponse).unwrap();
        assert_eq!(json, "\"CONTEXT_RESPONSE\"");
    }

    #[test]
    fn payload_round_trips() {
        let payload = ContextPayload {
            top_chunks: vec!["one".into(), "two".into()],
            query: "what?".into(),
        };
        let msg = Message::new(
            "retrieval",
            "response",
            MessageType::ContextResponse,
            serde_json::to_value(&payload).unwrap(),
        );
        let wire = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.msg_type, MessageType::ContextResponse);
        let decoded: ContextPayload = serde_json::from_value(back.payload).unwrap();
        assert_eq!(decoded.top_chunks, vec!["one", "two"]);
        assert_eq!(decoded.query, "what?");
    }
}
