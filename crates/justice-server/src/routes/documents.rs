//! Document analysis routes: summary, risks, full report and file upload.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::routes::{error_response, run_blocking, status_for, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/risks", post(analyze_risks))
        .route("/analyze", post(analyze))
        .route("/documents", post(upload_document))
}

#[derive(Deserialize)]
struct TextRequest {
    #[serde(default)]
    text: String,
    ratio: Option<f64>,
}

fn validate_ratio(ratio: Option<f64>) -> Result<Option<f64>, ApiError> {
    match ratio {
        Some(r) if !(r.is_finite() && r > 0.0 && r <= 1.0) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "ratio must be greater than 0 and at most 1",
        )),
        other => Ok(other),
    }
}

/// POST /api/summarize: extractive summary of `text`.
async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ratio = validate_ratio(req.ratio)?;
    let summary = run_blocking(move || state.analyzer.summarize(&req.text, ratio)).await?;
    Ok(Json(serde_json::json!({ "summary": summary })))
}

/// POST /api/risks: risk tier, counts and highlighted spans.
async fn analyze_risks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = run_blocking(move || state.analyzer.analyze_risks(&req.text)).await?;
    Ok(Json(serde_json::json!(result)))
}

/// POST /api/analyze: full document report for `text`.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ratio = validate_ratio(req.ratio)?;
    let report = run_blocking(move || state.analyzer.analyze_document(&req.text, ratio)).await?;
    Ok(Json(serde_json::json!(report)))
}

/// POST /api/documents: upload a txt, md or pdf file (multipart field `file`)
/// and analyze its text.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(error_response(e.status(), e.body_text())),
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| error_response(e.status(), e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "No file uploaded"))?;
    info!("Received document {} ({} bytes)", file_name, bytes.len());

    let worker_name = file_name.clone();
    let report = run_blocking(move || {
        justice_ingest::extract_text_from_bytes(&worker_name, &bytes)
            .map(|text| state.analyzer.analyze_document(&text, None))
    })
    .await?
    .map_err(|e| {
        warn!("Could not process {}: {}", file_name, e);
        error_response(status_for(&e), e.to_string())
    })?;

    let mut body = serde_json::json!(report);
    body["file_name"] = serde_json::Value::String(file_name);
    Ok(Json(body))
}
