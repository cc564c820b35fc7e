/// LLM Client — the single point of entry for calls to the generative text backend.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama API directly.
/// The expander talks to this module through the `TextGenerator` trait.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const TAGS_PATH: &str = "/api/tags";
const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Seam between the expander and whatever produces free text for it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Liveness check. `Ok(())` means generation may be attempted.
    async fn check_alive(&self) -> Result<(), LlmError>;

    /// Generates raw text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: Option<String>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Connection settings for an Ollama-compatible server.
#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub liveness_timeout: Duration,
    pub generate_timeout: Duration,
}

/// Ollama client. Holds only fixed configuration, so one instance is shared
/// by every request.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    settings: OllamaSettings,
}

impl OllamaClient {
    pub fn new(settings: OllamaSettings) -> Result<Self, LlmError> {
        // Per-request timeouts below are authoritative; this is the ceiling.
        let client = Client::builder()
            .timeout(settings.generate_timeout.max(settings.liveness_timeout))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn check_alive(&self) -> Result<(), LlmError> {
        let response = self
            .client
            .get(self.url(TAGS_PATH))
            .timeout(self.settings.liveness_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: "liveness check failed".to_string(),
            });
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            model: &self.settings.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.settings.temperature,
            },
        };

        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .timeout(self.settings.generate_timeout)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;

        debug!(
            "Ollama generation succeeded: model={}, eval_count={:?}",
            self.settings.model, body.eval_count
        );

        extract_text(body)
    }
}

/// Pulls the non-blank generated text out of a response body.
fn extract_text(body: GenerateResponse) -> Result<String, LlmError> {
    body.response
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LlmError::EmptyContent)
}
