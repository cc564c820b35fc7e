//! Keyword Expander — turns one seed phrase into a bounded candidate set.
//!
//! Primary path: liveness check, then a generation request through the
//! `TextGenerator` seam. Any failure on that path (unreachable, non-success,
//! timeout, empty or unusable output) routes to the pattern catalog. Errors
//! are logged, never returned.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::expansion::parser::parse_keyword_list;
use crate::expansion::patterns::generate_pattern_keywords;
use crate::expansion::prompts::build_expansion_prompt;
use crate::llm_client::{LlmError, TextGenerator};

/// Where an expansion's candidates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionSource {
    AiGenerated,
    PatternFallback,
}

/// Candidate keywords for one seed, plus their provenance.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub keywords: Vec<String>,
    pub source: ExpansionSource,
}

pub struct KeywordExpander {
    generator: Arc<dyn TextGenerator>,
    max_generated: usize,
    max_fallback: usize,
}

impl KeywordExpander {
    pub fn new(generator: Arc<dyn TextGenerator>, max_generated: usize, max_fallback: usize) -> Self {
        Self {
            generator,
            max_generated,
            max_fallback,
        }
    }

    /// Expands `seed` (already trimmed and non-empty). Never fails and never
    /// returns an empty set.
    pub async fn expand(&self, seed: &str) -> Expansion {
        match self.expand_with_backend(seed).await {
            Ok(keywords) => {
                info!("AI generated {} keywords for '{seed}'", keywords.len());
                Expansion {
                    keywords,
                    source: ExpansionSource::AiGenerated,
                }
            }
            Err(e) => {
                warn!("Keyword generation unavailable for '{seed}' ({e}); using pattern fallback");
                self.fallback(seed)
            }
        }
    }

    /// Deterministic pattern expansion.
    pub fn fallback(&self, seed: &str) -> Expansion {
        Expansion {
            keywords: generate_pattern_keywords(seed, self.max_fallback),
            source: ExpansionSource::PatternFallback,
        }
    }

    async fn expand_with_backend(&self, seed: &str) -> Result<Vec<String>, LlmError> {
        self.generator.check_alive().await?;

        let raw = self.generator.generate(&build_expansion_prompt(seed)).await?;
        let keywords = parse_keyword_list(&raw, self.max_generated);

        if keywords.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(keywords)
    }
}
