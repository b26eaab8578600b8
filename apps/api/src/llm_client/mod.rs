//! LLM Client: the single point of entry for generative-model calls.
//!
//! Wraps the Gemini `generateContent` REST API. Callers depend on the
//! `TextGenerator` trait so the model can be replaced by a fake in tests.
//! No retries: a failed call is reported once and the caller decides.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Prompt blocked by the model: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate that has any text.
    pub fn text(&self) -> Option<String> {
        self.candidates.iter().find_map(|candidate| {
            let text: String = candidate
                .content
                .as_ref()?
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini client. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            Duration::from_secs(config.gemini_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                self.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;

        if let Some(text) = response.text() {
            return Ok(text);
        }

        match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked(reason)),
            None => Err(LlmError::EmptyContent),
        }
    }
}

/// Strips ```lang ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline)
            if rest[..newline]
                .trim()
                .chars()
                .all(|c| c.is_ascii_alphanumeric()) =>
        {
            &rest[newline + 1..]
        }
        _ => rest,
    };

    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_strip_code_fences_with_tag() {
        let input = "```text\npython, rust\n```";
        assert_eq!(strip_code_fences(input), "python, rust");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\npython, rust\n```";
        assert_eq!(strip_code_fences(input), "python, rust");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        assert_eq!(strip_code_fences("  python, rust \n"), "python, rust");
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let raw = json!({
            "candidates": [
                {"content": {"parts": [{"text": "python, "}, {"text": "docker"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("python, docker"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let raw = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(parsed.text().is_none());
        assert_eq!(
            parsed.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GeminiClient::new(
            None,
            "http://127.0.0.1:9",
            "gemini-2.5-flash",
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(matches!(
            client.generate("hi").await,
            Err(LlmError::MissingApiKey)
        ));
    }

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    async fn spawn_fake_gemini(status: StatusCode, reply: Value) -> (String, Seen) {
        let seen: Seen = Arc::default();

        async fn handler(
            State((seen, status, reply)): State<(Seen, StatusCode, Value)>,
            headers: HeaderMap,
            Json(body): Json<Value>,
        ) -> (StatusCode, Json<Value>) {
            let key = headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            seen.lock().unwrap().push((key, body));
            (status, Json(reply))
        }

        let app = Router::new()
            .route("/v1beta/models/:model_action", post(handler))
            .with_state((seen.clone(), status, reply));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (format!("http://{addr}/v1beta"), seen)
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_key() {
        let reply = json!({
            "candidates": [{"content": {"parts": [{"text": "rust, tokio"}]}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        });
        let (base, seen) = spawn_fake_gemini(StatusCode::OK, reply).await;

        let client = GeminiClient::new(
            Some("test-key".to_string()),
            base,
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();

        let text = client.generate("list skills").await.unwrap();
        assert_eq!(text, "rust, tokio");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "test-key");
        assert_eq!(seen[0].1["contents"][0]["parts"][0]["text"], "list skills");
        assert_eq!(seen[0].1["contents"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let reply = json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}});
        let (base, _seen) = spawn_fake_gemini(StatusCode::BAD_REQUEST, reply).await;

        let client = GeminiClient::new(
            Some("bad-key".to_string()),
            base,
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();

        match client.generate("list skills").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_reported() {
        let reply = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let (base, _seen) = spawn_fake_gemini(StatusCode::OK, reply).await;

        let client = GeminiClient::new(
            Some("key".to_string()),
            base,
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(matches!(
            client.generate("list skills").await,
            Err(LlmError::Blocked(reason)) if reason == "SAFETY"
        ));
    }
}
