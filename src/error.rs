// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Factlens

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::upload::UploadError;

/// Result type alias for Factlens operations
pub type Result<T> = std::result::Result<T, FactlensError>;

/// A single failed field check, reported back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into(), location: "body" }
    }

    pub fn query(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into(), location: "query" }
    }
}

/// Factlens error types
#[derive(Error, Debug)]
pub enum FactlensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Ollama not available: {0}")]
    OllamaUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    success: bool,
    errors: &'a [FieldError],
}

#[derive(Serialize)]
struct MessageBody {
    success: bool,
    message: &'static str,
}

impl IntoResponse for FactlensError {
    fn into_response(self) -> Response {
        match self {
            FactlensError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationBody { success: false, errors: &errors }),
            )
                .into_response(),
            FactlensError::Upload(err) => {
                let status = match err {
                    UploadError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                let errors = [FieldError::body("file", err.to_string())];
                (status, Json(ValidationBody { success: false, errors: &errors })).into_response()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody { success: false, message: "Server error" }),
                )
                    .into_response()
            }
        }
    }
}
