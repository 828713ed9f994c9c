//! Axum handlers for `/api/*` routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::AppState;
use crate::error::QueryError;

#[derive(Debug, Default, Deserialize)]
pub(super) struct QueryRequest {
    #[serde(default)]
    query: Option<String>,
}

fn bad_request(e: QueryError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": e.to_string(),
            "response": "Please provide a question about movies.",
        })),
    )
        .into_response()
}

/// POST /api/query
///
/// A missing, non-string or unparseable body is treated like an empty
/// question.
pub(super) async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable query body");
            QueryRequest::default()
        }
    };
    let query = req.query.unwrap_or_default();

    match state.qa.answer(&query).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            warn!(error = %e, "rejected query");
            bad_request(e)
        }
    }
}

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    let status = state.qa.status();
    Json(json!({
        "status": "OK",
        "moviesLoaded": status.movies_loaded,
        "llmEnabled": status.llm_enabled,
        "llmType": status.llm_type,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}
