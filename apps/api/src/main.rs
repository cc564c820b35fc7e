mod config;
mod errors;
mod expansion;
mod keywords;
mod llm_client;
mod models;
mod pipeline;
mod ranking;
mod ranking_api;
mod routes;
mod scoring;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::expansion::KeywordExpander;
use crate::llm_client::{OllamaClient, OllamaSettings};
use crate::ranking_api::{MetricsSource, SeRankingClient};
use crate::routes::build_router;
use crate::scoring::KeywordScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SEO Keyword API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generative backend client
    let ollama = OllamaClient::new(OllamaSettings {
        base_url: config.ollama_base_url.clone(),
        model: config.ollama_model.clone(),
        temperature: config.ollama_temperature,
        liveness_timeout: Duration::from_secs(config.ollama_liveness_timeout_secs),
        generate_timeout: Duration::from_secs(config.ollama_generate_timeout_secs),
    })?;
    info!(
        "Ollama client initialized (model: {}, url: {})",
        ollama.model(),
        config.ollama_base_url
    );

    let expander = KeywordExpander::new(
        Arc::new(ollama),
        config.expansion_max_keywords,
        config.fallback_max_keywords,
    );

    // Ranking API is optional; without a key every keyword is estimated.
    let metrics_source: Option<Arc<dyn MetricsSource>> = match &config.se_ranking_api_key {
        Some(api_key) => {
            let client = SeRankingClient::new(
                config.se_ranking_base_url.clone(),
                api_key.clone(),
                Duration::from_secs(config.ranking_timeout_secs),
            )?;
            info!("SE Ranking client initialized ({})", config.se_ranking_base_url);
            Some(Arc::new(client))
        }
        None => {
            warn!("SE_RANKING_API_KEY not set; keyword metrics will be estimated");
            None
        }
    };

    let scorer = KeywordScorer::new(
        metrics_source,
        config.scoring_mode,
        config.scoring_concurrency,
        config.estimator_seed,
    );
    info!(
        "Keyword scorer initialized (mode: {}, concurrency: {})",
        config.scoring_mode.as_str(),
        config.scoring_concurrency
    );

    let state = AppState {
        expander: Arc::new(expander),
        scorer: Arc::new(scorer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
