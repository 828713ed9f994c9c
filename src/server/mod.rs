//! HTTP surface: JSON API under `/api/` plus the static chat page.
//!
//! ```text
//! POST /api/query   { "query": "..." } → QueryOutcome
//! GET  /api/health
//! GET  /favicon.ico → 204
//! GET  /            → {static_dir}/index.html or built-in page
//! GET  /*path       → file under {static_dir}, else 404
//! ```
//!
//! `serve` runs until the [`CancellationToken`] fires, then drains in-flight
//! requests through axum's graceful shutdown.

mod api;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::service::MovieQa;

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub qa: MovieQa,
    pub static_dir: Arc<Path>,
}

impl AppState {
    pub fn new(qa: MovieQa, static_dir: impl Into<PathBuf>) -> Self {
        Self { qa, static_dir: Arc::from(static_dir.into()) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/query",   post(api::query))
        .route("/api/health",  get(api::health))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/",            get(ui::root))
        .route("/{*path}",     get(ui::serve_path))
        .with_state(state)
}

/// Bind `config.bind` and serve until `shutdown` is cancelled.
pub async fn serve(config: &ServerConfig, qa: MovieQa, shutdown: CancellationToken) -> Result<(), AppError> {
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {}: {e}", config.bind)))?;
    serve_on(listener, AppState::new(qa, &config.static_dir), shutdown).await
}

/// Serve on an already-bound listener.
pub async fn serve_on(listener: TcpListener, state: AppState, shutdown: CancellationToken) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Server(format!("listener address unavailable: {e}")))?;
    info!(%addr, movies = state.qa.catalog().len(), "server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("server shut down");
    Ok(())
}
