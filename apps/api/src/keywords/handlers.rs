//! Axum route handlers for the keyword research API.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::expansion::ExpansionSource;
use crate::models::keyword::ScoredKeyword;
use crate::pipeline::{research_batch, research_keyword, validate_seed, BatchItem};
use crate::ranking::{BATCH_ITEM_CAP, SINGLE_REQUEST_CAP};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordBody {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateKeywordsResponse {
    pub seed_keyword: String,
    pub keywords: Vec<ScoredKeyword>,
    pub total_generated: usize,
    pub expansion_source: ExpansionSource,
    pub analysis_method: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub n8n_processed: bool,
    pub seed_keyword: String,
    pub keywords: Vec<ScoredKeyword>,
    pub total_generated: usize,
    pub top_opportunity: Option<ScoredKeyword>,
    pub expansion_source: ExpansionSource,
    pub data_source: String,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub batch_results: Vec<BatchItem>,
    pub total_processed: usize,
    pub api_provider: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /generate-keywords?keyword=...
pub async fn handle_generate_get(
    State(state): State<AppState>,
    query: Result<Query<KeywordQuery>, QueryRejection>,
) -> Result<Json<GenerateKeywordsResponse>, AppError> {
    let Query(query) =
        query.map_err(|e| AppError::Validation(format!("Invalid query string: {e}")))?;
    generate(&state, query.keyword.as_deref()).await
}

/// POST /generate-keywords
///
/// Body: `{"keyword": "..."}`. The body is parsed by hand so malformed JSON
/// still gets the JSON error envelope.
pub async fn handle_generate_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateKeywordsResponse>, AppError> {
    let body: KeywordBody = parse_json_body(&body)?;
    generate(&state, body.keyword.as_deref()).await
}

/// POST /n8n-webhook
///
/// Same pipeline as `/generate-keywords`, wrapped in a workflow-oriented envelope.
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, AppError> {
    let body: KeywordBody = parse_json_body(&body)?;
    let seed = require_seed(body.keyword.as_deref())?;

    let report = research_keyword(&state.expander, &state.scorer, &seed, SINGLE_REQUEST_CAP).await;

    Ok(Json(WebhookResponse {
        n8n_processed: true,
        top_opportunity: report.keywords.first().cloned(),
        seed_keyword: report.seed_keyword,
        keywords: report.keywords,
        total_generated: report.total_generated,
        expansion_source: report.expansion_source,
        data_source: analysis_method(&state, report.expansion_source),
    }))
}

/// POST /batch-keywords
///
/// Body: `{"keywords": [...]}`. Only the first 10 seeds are processed; each
/// returns at most 10 keywords.
pub async fn handle_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResponse>, AppError> {
    let body: Value = parse_json_body(&body)?;

    let seeds = match body.get("keywords").and_then(Value::as_array) {
        Some(seeds) if !seeds.is_empty() => seeds,
        _ => {
            return Err(AppError::Validation(
                "Please provide a list of keywords".to_string(),
            ))
        }
    };

    let batch_results = research_batch(&state.expander, &state.scorer, seeds, BATCH_ITEM_CAP).await;

    Ok(Json(BatchResponse {
        total_processed: batch_results.len(),
        batch_results,
        api_provider: provider_label(&state).to_string(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn generate(
    state: &AppState,
    keyword: Option<&str>,
) -> Result<Json<GenerateKeywordsResponse>, AppError> {
    let seed = require_seed(keyword)?;

    let report = research_keyword(&state.expander, &state.scorer, &seed, SINGLE_REQUEST_CAP).await;

    Ok(Json(GenerateKeywordsResponse {
        seed_keyword: report.seed_keyword,
        keywords: report.keywords,
        total_generated: report.total_generated,
        analysis_method: analysis_method(state, report.expansion_source),
        expansion_source: report.expansion_source,
    }))
}

fn require_seed(keyword: Option<&str>) -> Result<String, AppError> {
    match keyword {
        Some(keyword) => validate_seed(keyword),
        None => Err(AppError::Validation("Keyword is required".to_string())),
    }
}

fn parse_json_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::Validation("Request body must be JSON".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
}

fn provider_label(state: &AppState) -> &'static str {
    if state.scorer.has_live_source() {
        "SE Ranking"
    } else {
        "Estimator"
    }
}

fn analysis_method(state: &AppState, expansion: ExpansionSource) -> String {
    let scoring = if state.scorer.has_live_source() {
        "SE Ranking API"
    } else {
        "Heuristic estimate"
    };
    let expansion = match expansion {
        ExpansionSource::AiGenerated => "Ollama AI",
        ExpansionSource::PatternFallback => "Pattern fallback",
    };
    format!("{scoring} + {expansion} ({})", state.scorer.mode().as_str())
}
