// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! REST API for content analysis and reference data

mod upload;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::analysis::{AnalysisReport, ContentAnalyzer};
use crate::catalog::{self, Category, Source, TrendingTopic};
use crate::config::AppConfig;
use crate::db::{AnalysisRecord, DbState, ReportRecord};
use crate::error::FieldError;
use crate::upload::UploadPolicy;
use crate::validation::{self, AnalyzeBody, ReportBody};
use crate::{FactlensError, Result};

/// Shared application state
pub struct AppState {
    pub db: DbState,
    pub config: AppConfig,
    pub analyzer: Arc<dyn ContentAnalyzer>,
    pub upload_policy: UploadPolicy,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbState, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        let upload_policy = UploadPolicy::from_config(&config.upload);
        Self { db, config, analyzer, upload_policy }
    }
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Room for multipart framing around the largest accepted file
    let body_limit = usize::try_from(state.upload_policy.max_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024);

    let content = Router::new()
        .route("/analyze", post(api_analyze))
        .route("/sources", get(api_sources))
        .route("/report", post(api_report))
        .route("/categories", get(api_categories))
        .route("/trending-topics", get(api_trending_topics))
        .route("/upload", post(upload::api_upload));

    Router::new()
        .route("/api/health", get(api_health))
        .nest("/api/content", content)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Response envelopes ===

#[derive(Serialize)]
struct DataResponse<T: Serialize> {
    success: bool,
    data: T,
}

impl<T: Serialize> DataResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[derive(Serialize)]
struct ListResponse<T: Serialize> {
    success: bool,
    data: Vec<T>,
    total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    success: bool,
    message: &'static str,
    report_id: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    mode: &'static str,
    version: &'static str,
}

/// Turn a malformed JSON body into the same 400 shape as field errors
fn body_or_reject<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(inner)| inner).map_err(|rejection| {
        FactlensError::Validation(vec![FieldError::body("body", rejection.body_text())])
    })
}

/// Same for a query string that does not deserialize
fn query_or_reject<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query.map(|Query(inner)| inner).map_err(|rejection| {
        FactlensError::Validation(vec![FieldError::query("query", rejection.body_text())])
    })
}

// === API Handlers ===

async fn api_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.db.mode_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn api_analyze(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<DataResponse<AnalysisReport>>> {
    let request = validation::validate_analyze(body_or_reject(body)?)?;
    let report = state.analyzer.analyze(&request).await?;

    if let Some(db) = state.db.database() {
        let record = AnalysisRecord {
            id: report.id.clone(),
            content_type: report.content_type.as_str().to_string(),
            credibility_score: report.credibility_score,
            verdict: report.verdict.as_str().to_string(),
            analyzer: report.analyzer.clone(),
            created_at: report.analyzed_at,
        };
        // History is best-effort; the caller still gets the analysis
        if let Err(e) = db.record_analysis(&record) {
            warn!("Failed to record analysis {}: {}", record.id, e);
        }
    }

    info!("Analyzed {} content: score {}", request.content_type.as_str(), report.credibility_score);
    Ok(DataResponse::ok(report))
}

#[derive(Deserialize)]
struct SourcesQuery {
    category: Option<String>,
    limit: Option<String>,
}

async fn api_sources(
    query: std::result::Result<Query<SourcesQuery>, QueryRejection>,
) -> Result<Json<ListResponse<Source>>> {
    let query = query_or_reject(query)?;
    let limit = validation::parse_limit(query.limit.as_deref(), 10, 100)?;
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    let (data, total) = catalog::sources(category, limit);
    Ok(Json(ListResponse { success: true, data, total }))
}

async fn api_report(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ReportBody>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = validation::validate_report(body_or_reject(body)?)?;
    let report_id = new_report_id();

    if let Some(db) = state.db.database() {
        db.insert_report(&ReportRecord {
            id: report_id.clone(),
            content_id: input.content_id.clone(),
            reason: input.reason.clone(),
            description: input.description.clone(),
            created_at: Utc::now(),
        })?;
    }

    info!("Report {} filed against {} ({})", report_id, input.content_id, input.reason);
    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            success: true,
            message: "Report submitted successfully",
            report_id,
        }),
    ))
}

async fn api_categories() -> Json<DataResponse<&'static [Category]>> {
    DataResponse::ok(catalog::CATEGORIES)
}

#[derive(Deserialize)]
struct TrendingQuery {
    limit: Option<String>,
}

async fn api_trending_topics(
    query: std::result::Result<Query<TrendingQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<TrendingTopic>>>> {
    let query = query_or_reject(query)?;
    let limit = validation::parse_limit(query.limit.as_deref(), 5, 50)?;
    Ok(DataResponse::ok(catalog::trending_topics(limit)))
}

/// Generate a report ID: `RPT-` followed by 12 uppercase hex characters
pub fn new_report_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("RPT-{}", id[..12].to_ascii_uppercase())
}

/// Start the web server with config, database state and analyzer
pub async fn start_server(
    config: AppConfig,
    db: DbState,
    analyzer: Arc<dyn ContentAnalyzer>,
) -> crate::Result<()> {
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState::new(config, db, analyzer));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API available at http://{}/api", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
