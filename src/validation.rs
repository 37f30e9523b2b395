// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Request body and query validation
//!
//! Every check runs so the client gets the full list of problems in one
//! response, not just the first one.

use serde::Deserialize;

use crate::analysis::{AnalysisRequest, ContentType};
use crate::error::FieldError;
use crate::{FactlensError, Result};

pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 10_000;
pub const MAX_DESCRIPTION_CHARS: usize = 1_000;
pub const REPORT_REASONS: &[&str] = &["misinformation", "misleading", "spam", "inappropriate", "other"];

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeBody {
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub content_id: Option<String>,
    pub reason: Option<String>,
    pub description: Option<String>,
}

/// A report that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportInput {
    pub content_id: String,
    pub reason: String,
    pub description: Option<String>,
}

fn finish<T>(errors: Vec<FieldError>, value: Option<T>) -> Result<T> {
    match value {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(FactlensError::Validation(errors)),
    }
}

pub fn validate_analyze(body: AnalyzeBody) -> Result<AnalysisRequest> {
    let mut errors = Vec::new();

    let content = body.content.map(|c| c.trim().to_string()).unwrap_or_default();
    let chars = content.chars().count();
    if content.is_empty() {
        errors.push(FieldError::body("content", "Content is required"));
    } else if chars < MIN_CONTENT_CHARS {
        errors.push(FieldError::body(
            "content",
            format!("Content must be at least {} characters", MIN_CONTENT_CHARS),
        ));
    } else if chars > MAX_CONTENT_CHARS {
        errors.push(FieldError::body(
            "content",
            format!("Content must be at most {} characters", MAX_CONTENT_CHARS),
        ));
    }

    let content_type = match body.content_type.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::body("type", "Content type is required"));
            None
        }
        Some(raw) => {
            let parsed = ContentType::parse(raw);
            if parsed.is_none() {
                errors.push(FieldError::body("type", "Type must be one of: text, url, image, video"));
            }
            parsed
        }
    };

    finish(errors, content_type.map(|content_type| AnalysisRequest { content, content_type }))
}

pub fn validate_report(body: ReportBody) -> Result<ReportInput> {
    let mut errors = Vec::new();

    let content_id = body.content_id.map(|c| c.trim().to_string()).unwrap_or_default();
    if content_id.is_empty() {
        errors.push(FieldError::body("contentId", "Content ID is required"));
    }

    let reason = body.reason.map(|r| r.trim().to_ascii_lowercase()).unwrap_or_default();
    if reason.is_empty() {
        errors.push(FieldError::body("reason", "Reason is required"));
    } else if !REPORT_REASONS.contains(&reason.as_str()) {
        errors.push(FieldError::body(
            "reason",
            format!("Reason must be one of: {}", REPORT_REASONS.join(", ")),
        ));
    }

    let description = body
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    if description.as_ref().is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS) {
        errors.push(FieldError::body(
            "description",
            format!("Description must be at most {} characters", MAX_DESCRIPTION_CHARS),
        ));
    }

    finish(errors, Some(ReportInput { content_id, reason, description }))
}

/// Parse an optional `limit` query parameter within `1..=max`
pub fn parse_limit(raw: Option<&str>, default: usize, max: usize) -> Result<usize> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(limit) if (1..=max).contains(&limit) => Ok(limit),
        _ => Err(FactlensError::Validation(vec![FieldError::query(
            "limit",
            format!("Limit must be an integer between 1 and {}", max),
        )])),
    }
}
