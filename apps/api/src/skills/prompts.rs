// Prompt constants for skill extraction.
// The wording is part of the service's external behavior: changing it changes
// what the model returns.

/// Skill extraction prompt. Replace `{job_description}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = "\
You are a technical recruiter. Extract all programming languages, frameworks, and technical tools
from the following job description.
Return the result ONLY as a comma-separated list of lowercase words.
Do not include any introductory text or explanations.
Job Description: {job_description}
";

pub fn skill_extraction_prompt(job_description: &str) -> String {
    SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
