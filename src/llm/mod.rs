//! Generation provider abstraction: prompt in, text out.
//!
//! `LlmProvider` is an enum over the concrete backends. Exactly one is
//! built at startup from `[llm] default`; there is no runtime switching.
//! Enum dispatch keeps `complete` an `async fn` without trait objects.
//!
//! Provider instances are shared immutable capabilities; clone them freely.

pub mod providers;

use thiserror::Error;

use crate::config::ProviderKind;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("missing API key: set {0}")]
    MissingApiKey(String),
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("provider request timed out: {0}")]
    Timeout(String),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// Available generation backends.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Local model served by Ollama.
    Ollama(providers::ollama::OllamaProvider),
    /// Google Gemini cloud model.
    Gemini(providers::gemini::GeminiProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return its trimmed, non-empty reply.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Ollama(p) => p.complete(prompt).await,
            LlmProvider::Gemini(p) => p.complete(prompt).await,
        }
    }

    /// Cheap reachability probe used at startup. Never called per request.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        match self {
            LlmProvider::Ollama(p) => p.ping().await,
            LlmProvider::Gemini(_) => Ok(()),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            LlmProvider::Ollama(_) => ProviderKind::Ollama,
            LlmProvider::Gemini(_) => ProviderKind::Gemini,
        }
    }

    /// Short backend name, as reported by the health endpoint.
    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn model(&self) -> &str {
        match self {
            LlmProvider::Ollama(p) => p.model(),
            LlmProvider::Gemini(p) => p.model(),
        }
    }
}
