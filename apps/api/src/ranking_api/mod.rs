/// Ranking API client — the single point of entry for keyword metric lookups.
///
/// ARCHITECTURAL RULE: No other module may call the ranking provider directly.
/// The scorer talks to this module through the `MetricsSource` trait.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod adapter;

pub use adapter::{KeywordMetrics, MetricsAdapter, SeRankingAdapter};

const SUGGESTIONS_PATH: &str = "/research/keywords/suggestions";
const ANALYSIS_PATH: &str = "/analysis/keyword";
const LANGUAGE: &str = "en";
const COUNTRY: &str = "us";

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Api { status: u16 },

    #[error("Unexpected response shape from {endpoint}")]
    Malformed { endpoint: &'static str },
}

/// Seam between the scorer and whatever supplies live metrics.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self, keyword: &str) -> Result<KeywordMetrics, RankingError>;
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    keyword: &'a str,
    language: &'a str,
    country: &'a str,
}

/// SE Ranking client. Immutable after construction; shared by every request.
#[derive(Clone)]
pub struct SeRankingClient {
    client: Client,
    base_url: String,
    api_key: String,
    adapter: Arc<dyn MetricsAdapter>,
}

impl SeRankingClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, RankingError> {
        Self::with_adapter(base_url, api_key, timeout, Arc::new(SeRankingAdapter))
    }

    pub fn with_adapter(
        base_url: String,
        api_key: String,
        timeout: Duration,
        adapter: Arc<dyn MetricsAdapter>,
    ) -> Result<Self, RankingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            api_key,
            adapter,
        })
    }

    async fn post(&self, path: &str, keyword: &str) -> Result<Response, RankingError> {
        let body = LookupRequest {
            keyword,
            language: LANGUAGE,
            country: COUNTRY,
        };
        Ok(self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&body)
            .send()
            .await?)
    }

    /// Suggestions endpoint. `Ok(None)` means "try the analysis endpoint".
    async fn fetch_suggestions(&self, keyword: &str) -> Result<Option<KeywordMetrics>, RankingError> {
        let response = self.post(SUGGESTIONS_PATH, keyword).await?;
        if !response.status().is_success() {
            debug!("Suggestions lookup for '{keyword}' returned {}", response.status());
            return Ok(None);
        }
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(_) => return Ok(None),
        };
        Ok(self.adapter.from_suggestions(&body))
    }

    async fn fetch_analysis(&self, keyword: &str) -> Result<KeywordMetrics, RankingError> {
        let response = self.post(ANALYSIS_PATH, keyword).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::Api {
                status: status.as_u16(),
            });
        }
        let body: Value = response
            .json()
            .await
            .map_err(|_| RankingError::Malformed {
                endpoint: ANALYSIS_PATH,
            })?;
        self.adapter
            .from_analysis(&body)
            .ok_or(RankingError::Malformed {
                endpoint: ANALYSIS_PATH,
            })
    }
}

#[async_trait]
impl MetricsSource for SeRankingClient {
    /// Suggestions first; the analysis endpoint when suggestions is
    /// non-success or yields nothing usable.
    async fn fetch(&self, keyword: &str) -> Result<KeywordMetrics, RankingError> {
        if let Some(metrics) = self.fetch_suggestions(keyword).await? {
            return Ok(metrics);
        }
        self.fetch_analysis(keyword).await
    }
}
