//! HTTP route handlers. Everything is served under `/api`.

pub mod documents;
pub mod info;
pub mod questions;
pub mod terms;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use justice_core::Error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(info::routes())
        .merge(documents::routes())
        .merge(questions::routes())
        .merge(terms::routes())
}

pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Run CPU-bound analysis on the blocking pool so request bodies up to the
/// upload limit never stall the async workers.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        warn!("Analysis task failed: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("analysis task failed: {}", e),
        )
    })
}

/// Map a core error onto an HTTP status.
pub(crate) fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Error::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Config(_) | Error::Dataset(_) | Error::Io(_) | Error::Json(_) | Error::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use justice_core::{JusticeConfig, KnowledgeBase};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = JusticeConfig::default();
        let kb = KnowledgeBase::embedded().unwrap();
        build_router(Arc::new(AppState::new(config, kb).unwrap()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn upload(file_name: &str, content: &[u8]) -> (StatusCode, Value) {
        let boundary = "justice-test-boundary";
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            b = boundary,
            f = file_name
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/documents")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_info() {
        let (status, body) = get("/api/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "JusticeAI");
        assert_eq!(body["faq_entries"], 30);
        assert_eq!(body["faq_categories"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_ask_matches_faq() {
        let (status, body) = post_json(
            "/api/ask",
            json!({ "question": "What are my rights as a tenant in India?" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], true);
        assert_eq!(body["category"], "Property & Rental");
        assert!(body["similarity_score"].as_f64().unwrap() >= 0.6);
    }

    #[tokio::test]
    async fn test_ask_with_all_categories() {
        let (status, body) = post_json(
            "/api/ask",
            json!({
                "question": "What are the grounds for divorce in India?",
                "category": "All Categories"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "Family Law");
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_question() {
        let (status, body) = post_json("/api/ask", json!({ "question": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_risks() {
        let (status, body) = post_json(
            "/api/risks",
            json!({ "text": "The termination clause is standard." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall_tier"], "Low");
        assert_eq!(body["high_risk_count"], 1);
    }

    #[tokio::test]
    async fn test_summarize() {
        let (status, body) = post_json("/api/summarize", json!({ "text": "" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "No text available to summarize.");

        let (status, _) =
            post_json("/api/summarize", json!({ "text": "Rent.", "ratio": 5.0 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze() {
        let (status, body) = post_json(
            "/api/analyze",
            json!({ "text": "Payment is due monthly. Late payment incurs a penalty." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risks"]["medium_risk_count"], 2);
        assert_eq!(body["word_count"], 9);
        assert!(body["analyzed_at"].is_string());
    }

    #[tokio::test]
    async fn test_run_blocking_contains_panics() {
        let value = run_blocking(|| 21 * 2).await.unwrap();
        assert_eq!(value, 42);

        let (status, body) = run_blocking(|| -> u32 { panic!("worker exploded") })
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("analysis task failed"));
    }

    #[tokio::test]
    async fn test_faq_listing() {
        let (status, body) = get("/api/faq?category=Family%20Law").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"].as_array().unwrap().len(), 5);

        let (status, _) = get("/api/faq?category=Tax%20Law").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = get("/api/faq/samples").await;
        assert_eq!(body["samples"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_terms() {
        let (status, body) = get("/api/terms?search=bail").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["terms"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["term"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Anticipatory Bail", "Bail"]);

        let (status, body) = get("/api/terms/bail").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["term"], "Bail");

        let (status, _) = get("/api/terms/Nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = get("/api/terms/categories").await;
        assert_eq!(body["categories"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_document_upload() {
        let (status, body) = upload(
            "lease.txt",
            b"The tenant pays rent monthly. Termination requires notice.",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "lease.txt");
        assert_eq!(body["risks"]["high_risk_count"], 1);

        let (status, body) = upload("scan.png", b"\x89PNG").await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].as_str().unwrap().contains("images"));
    }
}
