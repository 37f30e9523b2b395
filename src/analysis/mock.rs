// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Fixed analysis used when no AI engine is configured

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{
    content_id, preview, AnalysisReport, AnalysisRequest, Claim, ContentAnalyzer, SourceRef, Verdict,
};
use crate::catalog;
use crate::Result;

const MOCK_SCORE: u8 = 72;

/// Analyzer returning a canned credibility report
pub struct MockAnalyzer;

impl MockAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Build the canned report for a request
    pub fn report_for(request: &AnalysisRequest) -> AnalysisReport {
        let sources = [1, 3]
            .into_iter()
            .filter_map(catalog::find_source)
            .map(|s| SourceRef {
                name: s.name.to_string(),
                url: s.url.to_string(),
                credibility_rating: s.credibility_rating,
            })
            .collect();

        AnalysisReport {
            id: content_id(&request.content),
            content_type: request.content_type,
            content_preview: preview(&request.content),
            credibility_score: MOCK_SCORE,
            verdict: Verdict::from_score(MOCK_SCORE),
            summary: "The content contains mostly accurate information, but some claims \
                      lack supporting evidence or omit important context."
                .to_string(),
            claims: vec![
                Claim {
                    text: "Primary claim is supported by multiple independent sources".to_string(),
                    verdict: Verdict::Credible,
                    confidence: 0.85,
                },
                Claim {
                    text: "Statistical figures could not be traced to an original dataset".to_string(),
                    verdict: Verdict::Unverified,
                    confidence: 0.6,
                },
            ],
            sources,
            flags: vec!["missing_context".to_string()],
            analyzer: "mock".to_string(),
            analyzed_at: Utc::now(),
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentAnalyzer for MockAnalyzer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        debug!("Mock analysis of {} content", request.content_type.as_str());
        Ok(Self::report_for(request))
    }
}
