// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Analysis backed by a local Ollama model

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{AnalysisReport, AnalysisRequest, Claim, ContentAnalyzer, MockAnalyzer, Verdict};
use crate::config::EngineConfig;
use crate::ollama::OllamaClient;
use crate::{FactlensError, Result};

const PROMPT: &str = "You are a fact-checking assistant. Assess the credibility of the \
following {kind} content. Respond with JSON only, shaped as \
{\"score\": <0-100>, \"summary\": \"<one paragraph>\", \
\"claims\": [{\"text\": \"<claim>\", \"score\": <0-100>}], \"flags\": [\"<issue>\"]}.\n\nContent:\n";

/// Shape the model is asked to answer with
#[derive(Debug, Deserialize)]
struct EngineAnswer {
    score: f64,
    summary: String,
    #[serde(default)]
    claims: Vec<EngineClaim>,
    #[serde(default)]
    flags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EngineClaim {
    text: String,
    score: f64,
}

fn clamp_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

/// Merge a model answer into the canned report skeleton
fn apply_answer(mut report: AnalysisReport, raw: &str) -> Result<AnalysisReport> {
    let answer: EngineAnswer = serde_json::from_str(raw.trim())
        .map_err(|e| FactlensError::Analysis(format!("Unparseable engine answer: {}", e)))?;

    let score = clamp_score(answer.score);
    report.credibility_score = score;
    report.verdict = Verdict::from_score(score);
    report.summary = answer.summary.trim().to_string();
    report.claims = answer
        .claims
        .into_iter()
        .filter(|c| !c.text.trim().is_empty())
        .map(|c| {
            let claim_score = clamp_score(c.score);
            Claim {
                text: c.text.trim().to_string(),
                verdict: Verdict::from_score(claim_score),
                confidence: f64::from(claim_score) / 100.0,
            }
        })
        .collect();
    report.flags = answer.flags;
    report.analyzer = "engine".to_string();
    Ok(report)
}

/// Analyzer that asks an Ollama model and falls back to the mock report
pub struct EngineAnalyzer {
    client: OllamaClient,
    model: String,
    retries: u32,
}

impl EngineAnalyzer {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            client: OllamaClient::new(config)?,
            model: config.model.clone(),
            retries: config.retries,
        })
    }
}

#[async_trait]
impl ContentAnalyzer for EngineAnalyzer {
    fn name(&self) -> &'static str {
        "engine"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        info!("Analyzing {} content with {}", request.content_type.as_str(), self.model);

        let prompt = format!(
            "{}{}",
            PROMPT.replace("{kind}", request.content_type.as_str()),
            request.content
        );
        let skeleton = MockAnalyzer::report_for(request);

        let answer = match self.client.generate_with_retry(&self.model, &prompt, self.retries).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("AI engine failed: {}, using fallback analysis", e);
                return Ok(skeleton);
            }
        };

        match apply_answer(skeleton.clone(), &answer) {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!("{}, using fallback analysis", e);
                Ok(skeleton)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ContentType;

    fn skeleton() -> AnalysisReport {
        MockAnalyzer::report_for(&AnalysisRequest {
            content: "Drinking seawater cures dehydration.".to_string(),
            content_type: ContentType::Text,
        })
    }

    #[test]
    fn test_apply_answer() {
        let raw = r#"{"score": 12.4, "summary": " Contradicts medical consensus. ",
                      "claims": [{"text": "Seawater hydrates", "score": 3}, {"text": " ", "score": 50}],
                      "flags": ["health_risk"]}"#;
        let report = apply_answer(skeleton(), raw).unwrap();

        assert_eq!(report.credibility_score, 12);
        assert_eq!(report.verdict, Verdict::False);
        assert_eq!(report.summary, "Contradicts medical consensus.");
        assert_eq!(report.claims.len(), 1);
        assert_eq!(report.claims[0].verdict, Verdict::False);
        assert_eq!(report.flags, vec!["health_risk".to_string()]);
        assert_eq!(report.analyzer, "engine");
        assert_eq!(report.sources.len(), 2);
    }

    #[test]
    fn test_scores_are_clamped() {
        let report = apply_answer(skeleton(), r#"{"score": 250, "summary": "ok"}"#).unwrap();
        assert_eq!(report.credibility_score, 100);
        assert!(report.claims.is_empty());
        assert_eq!(clamp_score(-4.0), 0);
    }

    #[test]
    fn test_garbage_answer_is_an_error() {
        assert!(matches!(
            apply_answer(skeleton(), "I think it is false"),
            Err(FactlensError::Analysis(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_engine_falls_back_to_mock() {
        let config = EngineConfig {
            enabled: true,
            url: "http://127.0.0.1:9".to_string(),
            model: "none".to_string(),
            timeout_secs: 1,
            retries: 0,
        };
        let analyzer = EngineAnalyzer::new(&config).unwrap();
        let request = AnalysisRequest {
            content: "Water boils at 100C at sea level.".to_string(),
            content_type: ContentType::Text,
        };
        let report = analyzer.analyze(&request).await.unwrap();
        assert_eq!(report.analyzer, "mock");
        assert_eq!(report.credibility_score, 72);
    }
}
