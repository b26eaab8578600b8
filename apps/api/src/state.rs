use crate::analysis::JobAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: JobAnalyzer,
    pub config: Config,
    /// Whether a model API key was configured; reported by /health.
    pub ai_enabled: bool,
}
