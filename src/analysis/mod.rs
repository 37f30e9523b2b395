// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Content analyzers producing credibility reports

pub mod engine;
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::Result;

pub use engine::EngineAnalyzer;
pub use mock::MockAnalyzer;

/// Kind of content submitted for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Url,
    Image,
    Video,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [Self::Text, Self::Url, Self::Image, Self::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

/// Overall credibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Credible,
    MostlyCredible,
    Mixed,
    Misleading,
    False,
    Unverified,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Credible,
            60..=79 => Self::MostlyCredible,
            40..=59 => Self::Mixed,
            20..=39 => Self::Misleading,
            _ => Self::False,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credible => "credible",
            Self::MostlyCredible => "mostly_credible",
            Self::Mixed => "mixed",
            Self::Misleading => "misleading",
            Self::False => "false",
            Self::Unverified => "unverified",
        }
    }
}

/// Validated analysis input
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub content: String,
    pub content_type: ContentType,
}

/// A single checked claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub text: String,
    pub verdict: Verdict,
    pub confidence: f64,
}

/// Source cited in a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub name: String,
    pub url: String,
    pub credibility_rating: u8,
}

/// Result of analysing one piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: String,
    pub content_type: ContentType,
    pub content_preview: String,
    pub credibility_score: u8,
    pub verdict: Verdict,
    pub summary: String,
    pub claims: Vec<Claim>,
    pub sources: Vec<SourceRef>,
    pub flags: Vec<String>,
    pub analyzer: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Trait for content analyzers
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Name of this analyzer
    fn name(&self) -> &'static str;

    /// Analyze content and return a credibility report
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport>;
}

/// Stable identifier for a piece of content
pub fn content_id(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    hash.to_hex()[..16].to_string()
}

/// First 100 characters, on a char boundary
pub fn preview(content: &str) -> String {
    const MAX: usize = 100;
    let trimmed = content.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Pick the analyzer described by the config
pub fn build_analyzer(config: &AppConfig) -> Arc<dyn ContentAnalyzer> {
    if !config.ai_engine.enabled {
        info!("AI engine disabled, using mock analysis");
        return Arc::new(MockAnalyzer::new());
    }

    match EngineAnalyzer::new(&config.ai_engine) {
        Ok(analyzer) => {
            info!("Using AI engine at {} (model {})", config.ai_engine.url, config.ai_engine.model);
            Arc::new(analyzer)
        }
        Err(e) => {
            warn!("Failed to initialise AI engine: {}, using mock analysis", e);
            Arc::new(MockAnalyzer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_score(100), Verdict::Credible);
        assert_eq!(Verdict::from_score(80), Verdict::Credible);
        assert_eq!(Verdict::from_score(79), Verdict::MostlyCredible);
        assert_eq!(Verdict::from_score(40), Verdict::Mixed);
        assert_eq!(Verdict::from_score(20), Verdict::Misleading);
        assert_eq!(Verdict::from_score(0), Verdict::False);
    }

    #[test]
    fn test_content_type_parse() {
        assert_eq!(ContentType::parse("url"), Some(ContentType::Url));
        assert_eq!(ContentType::parse("Text"), None);
        assert_eq!(ContentType::parse("audio"), None);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview("  short  "), "short");
    }

    #[test]
    fn test_content_id_is_stable() {
        assert_eq!(content_id("same text"), content_id("same text"));
        assert_ne!(content_id("same text"), content_id("other text"));
        assert_eq!(content_id("x").len(), 16);
    }

    #[test]
    fn test_build_analyzer_defaults_to_mock() {
        let analyzer = build_analyzer(&AppConfig::default());
        assert_eq!(analyzer.name(), "mock");
    }
}
