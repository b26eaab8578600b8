use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the degraded-mode signals (dictionary size, AI key).
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillscan",
        "dictionary_size": state.analyzer.matcher().dictionary().len(),
        "ai_enabled": state.ai_enabled,
        "model": state.config.gemini_model,
    }))
}
