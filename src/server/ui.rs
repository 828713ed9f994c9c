//! Static page handlers.
//!
//! Files are read from `static_dir` on each request. Paths containing
//! anything other than normal components (`..`, roots, prefixes) are 404.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use super::AppState;

// ── Root page ─────────────────────────────────────────────────────────────────

/// Served at `/` when `static_dir/index.html` does not exist.
const ROOT_INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Movie Bot</title>
  <style>
    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: #0f0f0f; color: #e0e0e0;
      display: flex; align-items: center; justify-content: center;
      height: 100vh;
    }
    .card {
      width: min(40rem, 90vw); padding: 2rem;
      border: 1px solid #333; border-radius: 12px;
      background: #1a1a1a;
    }
    h1 { font-size: 1.5rem; margin-bottom: 0.5rem; }
    p  { font-size: 0.9rem; color: #888; margin-bottom: 1rem; }
    form { display: flex; gap: 0.5rem; }
    input {
      flex: 1; padding: 0.5rem; border-radius: 8px;
      border: 1px solid #333; background: #0f0f0f; color: #e0e0e0;
    }
    button {
      padding: 0.5rem 1.5rem; border: 0; border-radius: 8px;
      background: #2a2a3a; color: #c0c0e0; cursor: pointer;
    }
    button:hover { background: #3a3a5a; }
    #answer { margin-top: 1rem; white-space: pre-wrap; line-height: 1.4; }
  </style>
</head>
<body>
  <div class="card">
    <h1>Movie Bot</h1>
    <p>Ask about a movie's director, cast, rating, release date, budget or runtime.</p>
    <form id="ask">
      <input id="query" placeholder="Who directed The Godfather?" autocomplete="off" />
      <button type="submit">Ask</button>
    </form>
    <div id="answer"></div>
  </div>
  <script>
    document.getElementById('ask').addEventListener('submit', async (e) => {
      e.preventDefault();
      const answer = document.getElementById('answer');
      answer.textContent = '...';
      const res = await fetch('/api/query', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ query: document.getElementById('query').value }),
      });
      const body = await res.json();
      answer.textContent = body.response;
    });
  </script>
</body>
</html>
"#;

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /: `index.html` from the static dir, or the built-in page.
pub(super) async fn root(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.static_dir.join("index.html")).await {
        Ok(bytes) => file_response("index.html", bytes),
        Err(_) => Html(ROOT_INDEX_HTML).into_response(),
    }
}

/// GET /*path: a file under the static dir, or 404.
pub(super) async fn serve_path(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(path) = resolve_static(&state.static_dir, uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => file_response(uri.path(), bytes),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "static file not served");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resolve_static(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let safe = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (safe && !relative.as_os_str().is_empty()).then(|| root.join(relative))
}

fn file_response(name: &str, bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type(name))], bytes).into_response()
}

fn content_type(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
