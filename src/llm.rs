//! Gemini client for answer generation.
//!
//! Thin wrapper over the `generateContent` REST endpoint. The retrieval core
//! never depends on this — it is only consumed by the response agent.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::LlmConfig;

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Build a client from config. The API key is read from the configured
    /// environment variable; a missing key only fails when a call is made.
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
            api_key_env: config.api_key_env.clone(),
        }
    }

    /// Send `prompt` as a single user turn and return the first candidate's
    /// text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("{} is not set — export your Gemini API key", self.api_key_env);
        };

        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.model, prompt_bytes = prompt.len(), "calling Gemini");

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Gemini returned HTTP {status}: {detail}");
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("failed to decode Gemini response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.is_empty() {
            bail!("Gemini returned no answer text");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape_decodes() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "the answer" } ] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "the answer");
    }

    #[test]
    fn empty_response_decodes_to_no_candidates() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_fails_at_call_time() {
        let config = LlmConfig {
            api_key_env: "ASKDOC_TEST_NO_SUCH_KEY".into(),
            ..LlmConfig::default()
        };
        let client = GeminiClient::new(&config);
        let err = client.generate("hello").await.unwrap_err().to_string();
        assert!(err.contains("ASKDOC_TEST_NO_SUCH_KEY"), "{err}");
    }
}
