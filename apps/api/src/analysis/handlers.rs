//! Axum route handlers for the analysis API.

use axum::{extract::State, Json};

use crate::analysis::{AnalysisResult, AnalyzeJobRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze-job
///
/// Fetches the posting and reports dictionary skills plus AI-only suggestions.
/// Fetch failures come back as `{"status": "error"}` with HTTP 200.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    Ok(Json(state.analyzer.analyze(&request.url).await))
}
