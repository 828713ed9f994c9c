//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, follows `[meta] base = "..."` inheritance chains, and
//! applies `MOVIE_BOT_LOG_LEVEL`, `MOVIE_BOT_CATALOG`, `PORT` and
//! `GEMINI_MODEL` overrides. Provider credentials only ever come from the
//! environment (`GEMINI_API_KEY`, falling back to `LLM_API_KEY`).

mod raw;
mod types;

pub use types::*;

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

use raw::RawConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Values taken from the process environment. Kept separate from the
/// loader so tests pass them directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub catalog_path: Option<String>,
    pub port: Option<String>,
    pub gemini_model: Option<String>,
    pub api_key: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("MOVIE_BOT_LOG_LEVEL").ok(),
            catalog_path: env::var("MOVIE_BOT_CATALOG").ok(),
            port: env::var("PORT").ok(),
            gemini_model: env::var("GEMINI_MODEL").ok(),
            api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("LLM_API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Load config from the given path, or `config/default.toml`, then apply
/// env-var overrides. Without an explicit path and without the default file,
/// built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        debug!("no {DEFAULT_CONFIG_PATH} found, using built-in defaults");
        resolve(RawConfig::default(), &overrides)
    }
}

/// Load an explicit config file and apply `overrides`.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    resolve(parsed, overrides)
}

/// Deep-merge two TOML values.
/// Tables merge recursively; any other overlay value replaces the base value.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain and return the
/// merged value. `visited` holds canonical paths seen in this chain.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let base = overlay
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
        .map(str::to_string);

    match base {
        Some(base_str) => {
            let base_path = if Path::new(&base_str).is_absolute() {
                PathBuf::from(base_str)
            } else {
                path.parent().unwrap_or(Path::new(".")).join(base_str)
            };
            let base_val = load_raw_merged(&base_path, visited)?;
            Ok(merge_toml(base_val, overlay))
        }
        None => Ok(overlay),
    }
}

fn resolve(parsed: RawConfig, overrides: &Overrides) -> Result<Config, AppError> {
    let provider = ProviderKind::parse(&parsed.llm.provider).ok_or_else(|| {
        AppError::Config(format!("unknown llm provider: '{}'", parsed.llm.provider))
    })?;

    let bind = match overrides.port.as_deref() {
        Some(port) => with_port(&parsed.server.bind, port)?,
        None => parsed.server.bind,
    };

    let catalog_path = overrides
        .catalog_path
        .as_deref()
        .unwrap_or(&parsed.catalog.path);

    let log_level = overrides
        .log_level
        .clone()
        .unwrap_or(parsed.bot.log_level);
    crate::logger::parse_level(&log_level).map_err(|e| AppError::Config(e.to_string()))?;

    let g = parsed.llm.gemini;
    let o = parsed.llm.ollama;

    Ok(Config {
        log_level,
        prompts_dir: expand_home(&parsed.bot.prompts_dir),
        server: ServerConfig {
            bind,
            static_dir: expand_home(&parsed.server.static_dir),
        },
        catalog: CatalogConfig {
            path: expand_home(catalog_path),
        },
        llm: LlmConfig {
            provider,
            ollama: OllamaConfig {
                url: o.url.trim_end_matches('/').to_string(),
                model: o.model,
                temperature: o.temperature,
                top_p: o.top_p,
                max_tokens: o.max_tokens,
                timeout_seconds: o.timeout_seconds,
            },
            gemini: GeminiConfig {
                api_base_url: g.api_base_url.trim_end_matches('/').to_string(),
                model: overrides.gemini_model.clone().unwrap_or(g.model),
                temperature: g.temperature,
                top_p: g.top_p,
                max_output_tokens: g.max_output_tokens,
                timeout_seconds: g.timeout_seconds,
            },
        },
        llm_api_key: overrides.api_key.clone(),
    })
}

/// Replace the port of a `host:port` bind address.
fn with_port(bind: &str, port: &str) -> Result<String, AppError> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("invalid PORT value: '{port}'")))?;
    let host = bind.rsplit_once(':').map(|(h, _)| h).unwrap_or(bind);
    Ok(format!("{host}:{port}"))
}

/// Expand a leading `~` to the user's home directory.
/// Paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for tests: no provider and no external calls.
impl Config {
    pub fn test_default(catalog_path: &Path) -> Self {
        let mut cfg = resolve(RawConfig::default(), &Overrides::default())
            .unwrap_or_else(|e| panic!("built-in defaults must resolve: {e}"));
        cfg.catalog.path = catalog_path.to_path_buf();
        cfg.llm.provider = ProviderKind::None;
        cfg.server.bind = "127.0.0.1:0".to_string();
        cfg
    }
}
