//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the rest of the crate
//! consumes. Raw TOML deserialization types live in `raw.rs`.

use std::fmt;
use std::path::PathBuf;

// ── Server ──────────────────────────────────────────────────────────────────

/// HTTP surface configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the axum listener binds to.
    pub bind: String,
    /// Directory holding `index.html` for the browser UI.
    pub static_dir: PathBuf,
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// CSV export the catalog is built from (already expanded, no `~`).
    pub path: PathBuf,
}

// ── LLM ─────────────────────────────────────────────────────────────────────

/// Which generation backend is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Local model served by Ollama.
    Ollama,
    /// Google Gemini cloud model.
    Gemini,
    /// No provider; every answer comes from the deterministic templates.
    None,
}

impl ProviderKind {
    /// Parse the `[llm] default = "..."` value. `local` and `cloud` are
    /// accepted as aliases for the two model variants.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" | "local" => Some(Self::Ollama),
            "gemini" | "cloud" => Some(Self::Gemini),
            "none" | "disabled" | "" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Gemini => "gemini",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local Ollama endpoint (`[llm.ollama]`).
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`.
    pub url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Upper bound on generated tokens (`num_predict`).
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// Google Gemini endpoint (`[llm.gemini]`).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root up to and including the version segment.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Active provider. Maps to `default` in `[llm]`.
    pub provider: ProviderKind,
    pub ollama: OllamaConfig,
    pub gemini: GeminiConfig,
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory with the prompt templates (`movie_answer.txt`, `movie_no_match.txt`).
    pub prompts_dir: PathBuf,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub llm: LlmConfig,
    /// API key from `GEMINI_API_KEY` / `LLM_API_KEY`. Never sourced from TOML.
    pub llm_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_names_and_aliases() {
        assert_eq!(ProviderKind::parse("ollama"), Some(ProviderKind::Ollama));
        assert_eq!(ProviderKind::parse("LOCAL"), Some(ProviderKind::Ollama));
        assert_eq!(ProviderKind::parse("gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse(" cloud "), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("none"), Some(ProviderKind::None));
        assert_eq!(ProviderKind::parse("gpt"), None);
    }

    #[test]
    fn provider_kind_display_matches_health_names() {
        assert_eq!(ProviderKind::Ollama.to_string(), "ollama");
        assert_eq!(ProviderKind::Gemini.to_string(), "gemini");
        assert_eq!(ProviderKind::None.to_string(), "none");
    }
}
