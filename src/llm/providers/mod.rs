//! Generation provider implementations.
//!
//! `build(config, api_key)` is the factory, called once at startup.
//! Adding a backend = new module + new `LlmProvider` variant + new match arm.

pub mod gemini;
pub mod ollama;

use serde::Deserialize;
use tracing::error;

use crate::config::{LlmConfig, ProviderKind};
use crate::llm::{LlmProvider, ProviderError};

/// Construct the active provider, or `None` when `[llm] default = "none"`.
///
/// `api_key` is sourced from the environment (never TOML) and is only
/// required by the cloud variant.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<Option<LlmProvider>, ProviderError> {
    match config.provider {
        ProviderKind::None => Ok(None),
        ProviderKind::Ollama => {
            let p = ollama::OllamaProvider::new(&config.ollama)?;
            Ok(Some(LlmProvider::Ollama(p)))
        }
        ProviderKind::Gemini => {
            let key = api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| ProviderError::MissingApiKey("GEMINI_API_KEY".into()))?;
            let p = gemini::GeminiProvider::new(&config.gemini, key)?;
            Ok(Some(LlmProvider::Gemini(p)))
        }
    }
}

/// Build a `reqwest` client carrying the per-request timeout.
pub(crate) fn http_client(timeout_seconds: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))
}

/// Classify a transport-level `reqwest` failure.
pub(crate) fn transport_error(provider: &str, url: &str, e: reqwest::Error) -> ProviderError {
    error!(%provider, %url, error = %e, "LLM HTTP request failed (transport)");
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Request(e.to_string())
    }
}

// Error envelope: `{"error": {"message": ...}}` (Gemini) or `{"error": "..."}` (Ollama).
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: serde_json::Value,
}

/// Return the response if successful, otherwise a structured error.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let detail = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|env| match env.error {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or(body);

    let message = format!("HTTP {status}: {detail}");
    error!(%status, %message, "LLM request returned HTTP error");
    Err(ProviderError::Request(message))
}

/// Trim a reply and reject blank text.
pub(crate) fn non_empty_reply(text: Option<String>) -> Result<String, ProviderError> {
    text.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("empty or missing content in response".into()))
}
