use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{error, warn};

use crate::scrape::fetcher::DEFAULT_MAX_BODY_BYTES;
use crate::skills::dictionary::SkillDictionary;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Only the Gemini key is a secret; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub gemini_timeout_secs: u64,
    pub skills_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub fetch_max_body_bytes: usize,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Refuse to start with an empty dictionary or without an API key.
    pub strict_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 60)?,
            skills_path: optional_env("SKILLS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("skills.json")),
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 10)?,
            fetch_max_body_bytes: parse_env("FETCH_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            host: optional_env("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8000)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            strict_startup: parse_env("STRICT_STARTUP", false)?,
        })
    }

    /// Decides whether the service may start with what was loaded.
    ///
    /// An empty dictionary or a missing model key is fatal under
    /// `strict_startup`; otherwise it is logged and the service runs degraded.
    pub fn check_startup(&self, dictionary: &SkillDictionary, has_api_key: bool) -> Result<()> {
        if dictionary.is_empty() {
            if self.strict_startup {
                bail!(
                    "Skill dictionary '{}' is missing or empty (STRICT_STARTUP=true)",
                    self.skills_path.display()
                );
            }
            warn!("Running without a skill dictionary; only AI extraction will report skills");
        }

        if !has_api_key {
            if self.strict_startup {
                bail!("GEMINI_API_KEY is not set (STRICT_STARTUP=true)");
            }
            error!("GEMINI_API_KEY not found in environment; AI extraction will return no skills");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            gemini_timeout_secs: 60,
            skills_path: PathBuf::from("skills.json"),
            fetch_timeout_secs: 10,
            fetch_max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            host: "0.0.0.0".to_string(),
            port: 8000,
            rust_log: "info".to_string(),
            strict_startup: false,
        }
    }
}

/// Returns the variable's value, treating an empty or blank value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
