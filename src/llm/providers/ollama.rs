//! Ollama local model provider (`POST /api/generate`, non-streaming).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use super::{check_status, http_client, non_empty_reply, transport_error};
use crate::config::OllamaConfig;
use crate::llm::ProviderError;

/// Adapter for a locally running Ollama server.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    pub fn new(config: &OllamaConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            url: config.url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Lists installed models via `GET /api/tags`.
    ///
    /// Uses a hard 5-second timeout regardless of the generation timeout.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        let client = http_client(5)?;
        let response = client
            .get(format!("{}/api/tags", self.url))
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("unreachable: {e}")))?;
        check_status(response).await.map(|_| ())
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                top_p: self.top_p,
                num_predict: self.max_tokens,
            },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending Ollama request");
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Ollama request payload");
        }

        let endpoint = format!("{}/api/generate", self.url);
        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("ollama", &endpoint, e))?;

        let response = check_status(response).await?;

        let parsed = response.json::<GenerateResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize Ollama response");
            ProviderError::MalformedResponse(format!("failed to parse response body: {e}"))
        })?;

        trace!(response = ?parsed.response, "Ollama reply");
        non_empty_reply(parsed.response)
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}
