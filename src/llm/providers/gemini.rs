//! Google Gemini provider (`models/{model}:generateContent`).
//!
//! The API key travels as the `key` query parameter. It is never logged.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use super::{check_status, http_client, non_empty_reply, transport_error};
use crate::config::GeminiConfig;
use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, ProviderError> {
        // Accept both "gemini-1.5-flash" and "models/gemini-1.5-flash".
        let model = config
            .model
            .strip_prefix("models/")
            .unwrap_or(&config.model)
            .to_string();

        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            api_base_url: config.api_base_url.clone(),
            model,
            temperature: config.temperature,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
                max_output_tokens: self.max_output_tokens,
            },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending Gemini request");
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Gemini request payload");
        }

        let endpoint = format!("{}/models/{}:generateContent", self.api_base_url, self.model);
        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("gemini", &endpoint, e.without_url()))?;

        let response = check_status(response).await?;

        let parsed = response.json::<GenerateContentResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize Gemini response");
            ProviderError::MalformedResponse(format!("failed to parse response body: {e}"))
        })?;

        debug!(candidates = parsed.candidates.len(), "received Gemini response");

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);
        non_empty_reply(text)
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = r"^/models/gemini-1\.5-flash:generateContent";

    fn config(base: &str) -> GeminiConfig {
        GeminiConfig {
            api_base_url: base.to_string(),
            model: "gemini-1.5-flash".into(),
            temperature: 0.3,
            top_p: 0.9,
            max_output_tokens: 1000,
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn complete_posts_generate_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(PATH.into()))
            .match_query(Matcher::UrlEncoded("key".into(), "secret".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "Who directed Heat?" }] }],
                "generationConfig": { "maxOutputTokens": 1000 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Michael Mann.\n"}],"role":"model"}}]}"#)
            .create_async()
            .await;

        let provider = GeminiProvider::new(&config(&server.url()), "secret".into()).unwrap();
        assert_eq!(provider.complete("Who directed Heat?").await.unwrap(), "Michael Mann.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn models_prefix_is_stripped() {
        let mut cfg = config("http://unused");
        cfg.model = "models/gemini-1.5-flash".into();
        let provider = GeminiProvider::new(&cfg, "k".into()).unwrap();
        assert_eq!(provider.model(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn api_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex(PATH.into()))
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let provider = GeminiProvider::new(&config(&server.url()), "bad".into()).unwrap();
        match provider.complete("hi").await {
            Err(ProviderError::Request(msg)) => {
                assert!(msg.contains("400"), "{msg}");
                assert!(msg.contains("API key not valid."), "{msg}");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_candidates_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex(PATH.into()))
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let provider = GeminiProvider::new(&config(&server.url()), "k".into()).unwrap();
        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }
}
