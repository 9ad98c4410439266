//! Legal glossary routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::routes::{error_response, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/terms", get(search_terms))
        .route("/terms/categories", get(term_categories))
        .route("/terms/{name}", get(get_term))
}

#[derive(Deserialize)]
struct TermQuery {
    search: Option<String>,
    category: Option<String>,
}

/// GET /api/terms?search=&category=
async fn search_terms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TermQuery>,
) -> Json<serde_json::Value> {
    let terms = state
        .knowledge()
        .search_terms(query.search.as_deref(), query.category.as_deref());
    Json(serde_json::json!({
        "terms": terms,
        "total": terms.len(),
    }))
}

/// GET /api/terms/categories
async fn term_categories(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "categories": state.knowledge().glossary().categories }))
}

/// GET /api/terms/{name}
async fn get_term(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .knowledge()
        .term(&name)
        .map(|term| Json(serde_json::json!(term)))
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Unknown term: {}", name)))
}
