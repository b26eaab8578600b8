//! AI Extractor: asks the generative model for the skills in a job description.
//!
//! This step degrades instead of failing: any model error is logged and turned
//! into an empty list so the dictionary results still reach the caller.

use tracing::{debug, error, info, warn};

use crate::llm_client::{strip_code_fences, TextGenerator};

use super::prompts::skill_extraction_prompt;

/// Tokens longer than this are prose, not skill names.
const MAX_SKILL_LEN: usize = 64;

/// Returns the lowercase skills the model reports for `job_description`, in
/// the order the model listed them.
pub async fn extract_skills(job_description: &str, llm: &dyn TextGenerator) -> Vec<String> {
    if job_description.trim().is_empty() {
        warn!("Empty job description; skipping AI extraction");
        return Vec::new();
    }

    let prompt = skill_extraction_prompt(job_description);

    match llm.generate(&prompt).await {
        Ok(answer) => {
            debug!("AI response: {answer}");
            let skills = parse_skill_list(&answer);
            info!("AI extraction returned {} skills", skills.len());
            skills
        }
        Err(e) => {
            error!("AI extraction failed: {e}");
            Vec::new()
        }
    }
}

/// Lenient parser for a comma-separated model answer.
///
/// Splits on commas, trims and lowercases each token, strips quote and
/// emphasis wrapping, and drops empty, overlong or symbol-only tokens.
pub fn parse_skill_list(answer: &str) -> Vec<String> {
    strip_code_fences(answer)
        .split(',')
        .map(|token| {
            token
                .trim()
                .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
                .trim()
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .filter(|token| token.chars().count() <= MAX_SKILL_LEN)
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .collect()
}
