//! Job analysis pipeline: fetch → extract → dictionary match → AI extraction → diff.
//!
//! Straight-line per request. The only branch is the fetch failure, which ends
//! the pipeline with an `error` result; dictionary and model problems only
//! shrink the skill sets.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::TextGenerator;
use crate::scrape::extract::extract_description;
use crate::scrape::fetcher::PageFetcher;
use crate::skills::ai_extractor;
use crate::skills::matcher::SkillMatcher;
use crate::skills::SkillSet;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeJobRequest {
    pub url: String,
}

/// Response payload, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResult {
    Success {
        url: String,
        matched_skills_count: usize,
        matched_skills: SkillSet,
        ai_suggested_skills: Vec<String>,
    },
    Error {
        message: String,
    },
}

/// Everything a single analysis needs, built once at startup and shared
/// read-only across requests.
#[derive(Clone)]
pub struct JobAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
    matcher: Arc<SkillMatcher>,
    llm: Arc<dyn TextGenerator>,
}

/// Output of the text stages, before the AI-only diff.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillFindings {
    pub matched: SkillSet,
    pub ai_extracted: Vec<String>,
}

impl JobAnalyzer {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        matcher: Arc<SkillMatcher>,
        llm: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            llm,
        }
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    pub fn fetcher(&self) -> &dyn PageFetcher {
        self.fetcher.as_ref()
    }

    /// Runs both skill identification methods over an already extracted description.
    pub async fn find_skills(&self, description: &str) -> SkillFindings {
        let matched = self.matcher.find_skills(description);
        let ai_extracted = ai_extractor::extract_skills(description, self.llm.as_ref()).await;
        SkillFindings {
            matched,
            ai_extracted,
        }
    }

    /// Fetches the trimmed url; a success echoes `requested_url` unchanged.
    pub async fn analyze(&self, requested_url: &str) -> AnalysisResult {
        let url = requested_url.trim();
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return AnalysisResult::Error {
                    message: e.to_marked_message(),
                };
            }
        };

        let description = extract_description(&html);
        if description.is_empty() {
            warn!("No paragraph text found at {}", url);
        }

        let findings = self.find_skills(&description).await;
        let ai_suggested_skills = ai_only_skills(&findings.ai_extracted, &findings.matched);

        info!(
            "Analyzed {}: {} dictionary skills, {} AI-only suggestions",
            url,
            findings.matched.len(),
            ai_suggested_skills.len()
        );

        AnalysisResult::Success {
            url: requested_url.to_string(),
            matched_skills_count: findings.matched.len(),
            matched_skills: findings.matched,
            ai_suggested_skills,
        }
    }
}

/// Distinct AI skills that the dictionary did not already find.
pub fn ai_only_skills(ai_extracted: &[String], matched: &SkillSet) -> Vec<String> {
    let ai: SkillSet = ai_extracted.iter().map(|s| s.to_lowercase()).collect();
    ai.difference(matched).cloned().collect()
}
