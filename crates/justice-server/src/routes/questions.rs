//! Legal question answering and FAQ browsing.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use justice_core::knowledge::ALL_CATEGORIES;

use crate::routes::{error_response, run_blocking, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ask", post(ask))
        .route("/faq", get(list_faq))
        .route("/faq/samples", get(sample_questions))
}

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
    category: Option<String>,
}

/// POST /api/ask: match a question against the FAQ corpus.
async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let question = req.question.trim().to_string();
    if question.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Please enter a question"));
    }

    let result = run_blocking(move || {
        state
            .analyzer
            .find_answer(&question, req.category.as_deref())
            .into_result()
    })
    .await?;
    info!(
        "Question answered: found={} score={:?}",
        result.found, result.similarity_score
    );
    Ok(Json(serde_json::json!(result)))
}

#[derive(Deserialize)]
struct FaqQuery {
    category: Option<String>,
}

/// GET /api/faq: categories and entries, optionally for one category.
async fn list_faq(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FaqQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kb = state.knowledge();
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    if let Some(name) = category {
        if !kb.categories().iter().any(|c| c == name) {
            return Err(error_response(
                StatusCode::NOT_FOUND,
                format!("Unknown category: {}", name),
            ));
        }
    }

    let entries = kb.faq_entries(category);
    Ok(Json(serde_json::json!({
        "categories": kb.categories(),
        "entries": entries,
        "total": entries.len(),
    })))
}

/// GET /api/faq/samples: the first question of each category.
async fn sample_questions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let samples: Vec<serde_json::Value> = state
        .knowledge()
        .sample_questions()
        .into_iter()
        .map(|e| serde_json::json!({ "question": e.question, "category": e.category }))
        .collect();
    Json(serde_json::json!({ "samples": samples }))
}
