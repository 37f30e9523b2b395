// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Integration tests for the content API

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use factlens::analysis::MockAnalyzer;
use factlens::config::AppConfig;
use factlens::db::{Database, DbState};
use factlens::web::{create_router, AppState};

/// Test helper: app in demo mode (no database)
fn demo_app() -> Router {
    app_with(DbState::Demo, AppConfig::default())
}

fn app_with(db: DbState, config: AppConfig) -> Router {
    let state = AppState::new(config, db, Arc::new(MockAnalyzer::new()));
    create_router(Arc::new(state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_file(name: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "factlens-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            name, mime
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/content/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

fn post_form_without_file() -> Request<Body> {
    let boundary = "factlens-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );

    Request::builder()
        .method("POST")
        .uri("/api/content/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Test helper: status plus parsed JSON body
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_demo_mode() {
    let (status, body) = send(demo_app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "demo");
}

#[tokio::test]
async fn test_health_reports_database_mode() {
    let app = app_with(DbState::Connected(Database::in_memory().unwrap()), AppConfig::default());
    let (_, body) = send(app, get("/api/health")).await;
    assert_eq!(body["mode"], "database");
}

// =============================================================================
// Analyze
// =============================================================================

#[tokio::test]
async fn test_analyze_returns_report() {
    let (status, body) = send(
        demo_app(),
        post_json(
            "/api/content/analyze",
            json!({"content": "Scientists confirm the earth orbits the sun.", "type": "text"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["contentType"], "text");
    assert_eq!(body["data"]["credibilityScore"], 72);
    assert!(body["data"]["claims"].is_array());
}

#[tokio::test]
async fn test_analyze_short_content_is_400() {
    let (status, body) = send(
        demo_app(),
        post_json("/api/content/analyze", json!({"content": "fake", "type": "text"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["field"], "content");
}

#[tokio::test]
async fn test_analyze_invalid_type_is_400() {
    let (status, body) = send(
        demo_app(),
        post_json(
            "/api/content/analyze",
            json!({"content": "A perfectly long piece of content", "type": "podcast"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["field"], "type");
}

#[tokio::test]
async fn test_analyze_oversized_content_is_400() {
    let content = "a".repeat(10_001);
    let (status, body) = send(
        demo_app(),
        post_json("/api/content/analyze", json!({"content": content, "type": "text"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "content");
    assert_eq!(body["errors"][0]["message"], "Content must be at most 10000 characters");
}

#[tokio::test]
async fn test_analyze_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/content/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(demo_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_analyze_recorded_when_database_connected() {
    let db = Database::in_memory().unwrap();
    let app = app_with(DbState::Connected(db.clone()), AppConfig::default());
    let (status, body) = send(
        app,
        post_json("/api/content/analyze", json!({"content": "https://example.com/story", "type": "url"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let recent = db.recent_analyses(10).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, body["data"]["id"].as_str().unwrap());
    assert_eq!(recent[0].content_type, "url");
}

// =============================================================================
// Reference data
// =============================================================================

#[tokio::test]
async fn test_categories_has_eight_entries() {
    let (status, body) = send(demo_app(), get("/api/content/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 8);
    assert_eq!(body["data"][0]["id"], "politics");
}

#[tokio::test]
async fn test_sources_filter_and_limit() {
    let (status, body) = send(demo_app(), get("/api/content/sources?category=Politics&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(body["total"], 3);
    assert!(data.iter().all(|s| s["category"] == "politics"));
    assert!(data[0]["credibilityRating"].is_number());
}

#[tokio::test]
async fn test_sources_default_limit() {
    let (_, body) = send(demo_app(), get("/api/content/sources")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_sources_invalid_limit_is_400() {
    let (status, body) = send(demo_app(), get("/api/content/sources?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["location"], "query");
}

#[tokio::test]
async fn test_duplicate_query_field_is_400_with_error_list() {
    let (status, body) = send(demo_app(), get("/api/content/sources?limit=1&limit=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["location"], "query");
}

#[tokio::test]
async fn test_trending_topics_limit_above_max_is_400() {
    let (status, body) = send(demo_app(), get("/api/content/trending-topics?limit=51")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "limit");
}

#[tokio::test]
async fn test_trending_topics_limit() {
    let (_, body) = send(demo_app(), get("/api/content/trending-topics")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = send(demo_app(), get("/api/content/trending-topics?limit=2")).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["trend"], "up");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_report_created_in_demo_mode() {
    let (status, body) = send(
        demo_app(),
        post_json(
            "/api/content/report",
            json!({"contentId": "abc123", "reason": "misinformation", "description": "Doctored photo"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["reportId"].as_str().unwrap().starts_with("RPT-"));
}

#[tokio::test]
async fn test_report_persisted_when_database_connected() {
    let db = Database::in_memory().unwrap();
    let app = app_with(DbState::Connected(db.clone()), AppConfig::default());
    let (_, body) = send(
        app,
        post_json("/api/content/report", json!({"contentId": "abc123", "reason": "spam"})),
    )
    .await;

    let id = body["reportId"].as_str().unwrap();
    let stored = db.get_report(id).unwrap().unwrap();
    assert_eq!(stored.content_id, "abc123");
    assert_eq!(stored.reason, "spam");
}

#[tokio::test]
async fn test_report_missing_fields_is_400() {
    let (status, body) = send(
        demo_app(),
        post_json("/api/content/report", json!({"description": "no id"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["contentId", "reason"]);
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test]
async fn test_upload_accepts_image_with_preview() {
    let (status, body) = send(demo_app(), post_file("photo.gif", "image/gif", b"GIF89a-not-really")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mediaType"], "image");
    assert_eq!(body["data"]["fileName"], "photo.gif");
    assert_eq!(body["data"]["size"], 17);
    assert!(body["data"]["preview"].as_str().unwrap().starts_with("data:image/gif;base64,"));
    // Undecodable image data has no dimensions
    assert!(body["data"].get("width").is_none());
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type() {
    let (status, body) = send(demo_app(), post_file("tool.exe", "application/x-msdownload", b"MZ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "file");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let mut config = AppConfig::default();
    config.upload.max_size_mb = 1;
    let app = app_with(DbState::Demo, config);

    // Over the policy limit but inside the multipart framing allowance
    let bytes = vec![0u8; 1024 * 1024 + 10];
    let (status, body) = send(app, post_file("big.png", "image/png", &bytes)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["errors"][0]["message"], "File size exceeds 1MB limit");
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let (status, body) = send(demo_app(), post_form_without_file()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "No file provided");
}
