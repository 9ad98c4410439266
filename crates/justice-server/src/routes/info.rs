//! Server info route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use justice_core::config::{APP_NAME, APP_VERSION};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/info", get(get_info))
}

/// GET /api/info: application name, version and dataset sizes.
async fn get_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let kb = state.knowledge();
    Json(serde_json::json!({
        "name": APP_NAME,
        "version": APP_VERSION,
        "faq_entries": kb.faq().len(),
        "faq_categories": kb.categories(),
        "risk_terms": {
            "high": kb.risk_terms().high.len(),
            "medium": kb.risk_terms().medium.len(),
        },
        "glossary_terms": kb.glossary().terms.len(),
        "similarity_threshold": state.config.similarity_threshold,
        "summarization_ratio": state.config.summarization_ratio,
        "max_upload_bytes": state.config.max_upload_bytes,
        "started_at": state.started_at.to_rfc3339(),
    }))
}
