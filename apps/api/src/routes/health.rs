use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which scoring backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "SEO Keyword API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "ranking_api": ranking_api_status(&state),
        "scoring_mode": state.scorer.mode().as_str(),
        "expansion_model": state.config.ollama_model,
    }))
}

/// GET /
/// Service banner listing the available endpoints.
pub async fn index_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "SEO Keyword API is running!",
        "endpoints": [
            "/health",
            "/generate-keywords",
            "/n8n-webhook",
            "/batch-keywords"
        ],
        "features": [
            "Ollama keyword expansion with pattern fallback",
            "SE Ranking metrics with heuristic fallback",
            "Workflow webhook",
            "Batch processing"
        ],
        "ranking_api": ranking_api_status(&state),
    }))
}

fn ranking_api_status(state: &AppState) -> &'static str {
    if state.scorer.has_live_source() {
        "configured"
    } else {
        "not_configured"
    }
}
