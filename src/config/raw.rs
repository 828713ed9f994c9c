//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! `super::resolve` converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape, the serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub bot: RawBot,
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub catalog: RawCatalog,
    #[serde(default)]
    pub llm: RawLlm,
}

#[derive(Deserialize)]
pub(super) struct RawBot {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,
}

impl Default for RawBot {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prompts_dir: default_prompts_dir(),
        }
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawCatalog {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for RawCatalog {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

// ── LLM ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    /// `default = "..."` in `[llm]`, named `default` because both provider
    /// sections may coexist while only one is loaded.
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub ollama: RawOllamaConfig,
    #[serde(default)]
    pub gemini: RawGeminiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            ollama: RawOllamaConfig::default(),
            gemini: RawGeminiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_ollama_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawOllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_ollama_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_gemini_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_tokens(),
            timeout_seconds: default_gemini_timeout_seconds(),
        }
    }
}

// ── Defaults ────────────────────────────────────────────────────────────────

fn default_log_level() -> String { "info".to_string() }
fn default_prompts_dir() -> String { "config/prompts".to_string() }
fn default_bind() -> String { "127.0.0.1:3001".to_string() }
fn default_static_dir() -> String { "public".to_string() }
fn default_catalog_path() -> String { "IMDB_Movies_Dataset.csv".to_string() }
fn default_llm_provider() -> String { "gemini".to_string() }
fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_ollama_model() -> String { "llama3.1:8b".to_string() }
fn default_ollama_timeout_seconds() -> u64 { 120 }
fn default_gemini_api_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }
fn default_gemini_timeout_seconds() -> u64 { 60 }
fn default_temperature() -> f32 { 0.3 }
fn default_top_p() -> f32 { 0.9 }
fn default_max_tokens() -> u32 { 1000 }
