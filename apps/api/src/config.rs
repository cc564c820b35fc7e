use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::ScoringMode;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "mistral";
const DEFAULT_SE_RANKING_BASE_URL: &str = "https://api4.seranking.com";

/// Application configuration loaded from environment variables.
/// Every variable is optional; a missing ranking API key degrades scoring to
/// the heuristic estimator instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_temperature: f32,
    pub ollama_liveness_timeout_secs: u64,
    pub ollama_generate_timeout_secs: u64,
    /// Cap on candidates parsed from the generative backend.
    pub expansion_max_keywords: usize,
    /// Cap on candidates produced by the pattern catalog.
    pub fallback_max_keywords: usize,
    pub se_ranking_api_key: Option<String>,
    pub se_ranking_base_url: String,
    pub ranking_timeout_secs: u64,
    pub scoring_mode: ScoringMode,
    pub scoring_concurrency: usize,
    pub estimator_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_temperature: 0.7,
            ollama_liveness_timeout_secs: 5,
            ollama_generate_timeout_secs: 30,
            expansion_max_keywords: 100,
            fallback_max_keywords: 80,
            se_ranking_api_key: None,
            se_ranking_base_url: DEFAULT_SE_RANKING_BASE_URL.to_string(),
            ranking_timeout_secs: 15,
            scoring_mode: ScoringMode::default(),
            scoring_concurrency: 4,
            estimator_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url)
                .trim_end_matches('/')
                .to_string(),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            ollama_temperature: parse_env("OLLAMA_TEMPERATURE", defaults.ollama_temperature)?,
            ollama_liveness_timeout_secs: parse_env(
                "OLLAMA_LIVENESS_TIMEOUT_SECS",
                defaults.ollama_liveness_timeout_secs,
            )?,
            ollama_generate_timeout_secs: parse_env(
                "OLLAMA_GENERATE_TIMEOUT_SECS",
                defaults.ollama_generate_timeout_secs,
            )?,
            expansion_max_keywords: parse_env::<usize>("EXPANSION_MAX_KEYWORDS", defaults.expansion_max_keywords)?
                .max(1),
            fallback_max_keywords: parse_env::<usize>("FALLBACK_MAX_KEYWORDS", defaults.fallback_max_keywords)?
                .max(1),
            se_ranking_api_key: optional_env("SE_RANKING_API_KEY"),
            se_ranking_base_url: std::env::var("SE_RANKING_BASE_URL")
                .unwrap_or(defaults.se_ranking_base_url)
                .trim_end_matches('/')
                .to_string(),
            ranking_timeout_secs: parse_env("RANKING_TIMEOUT_SECS", defaults.ranking_timeout_secs)?,
            scoring_mode: parse_env("SCORING_MODE", defaults.scoring_mode)?,
            scoring_concurrency: parse_env::<usize>(
                "SCORING_CONCURRENCY",
                defaults.scoring_concurrency,
            )?
            .max(1),
            estimator_seed: optional_env("ESTIMATOR_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("ESTIMATOR_SEED must be an unsigned integer")?,
        })
    }
}

/// Returns the variable's value, treating unset and blank as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_caps_clamped_to_one() {
        std::env::set_var("EXPANSION_MAX_KEYWORDS", "0");
        std::env::set_var("FALLBACK_MAX_KEYWORDS", "0");
        let config = Config::from_env().unwrap();
        std::env::remove_var("EXPANSION_MAX_KEYWORDS");
        std::env::remove_var("FALLBACK_MAX_KEYWORDS");
        assert_eq!(config.expansion_max_keywords, 1);
        assert_eq!(config.fallback_max_keywords, 1);
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.expansion_max_keywords, 100);
        assert_eq!(config.fallback_max_keywords, 80);
        assert_eq!(config.scoring_mode, ScoringMode::ThreeFactor);
        assert!(config.se_ranking_api_key.is_none());
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u64 = parse_env("SEO_KEYWORD_API_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_optional_env_treats_unset_as_none() {
        assert!(optional_env("SEO_KEYWORD_API_TEST_UNSET_VARIABLE").is_none());
    }
}
