//! Keyword research pipeline: expand → score → rank, for one seed or a batch.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::expansion::{ExpansionSource, KeywordExpander};
use crate::models::keyword::ScoredKeyword;
use crate::ranking::rank_keywords;
use crate::scoring::KeywordScorer;

/// Seeds processed per batch request; the rest are ignored.
pub const MAX_BATCH_SEEDS: usize = 10;

/// Ranked result for one seed.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub seed_keyword: String,
    pub keywords: Vec<ScoredKeyword>,
    /// Candidates produced by expansion, before ranking truncation.
    pub total_generated: usize,
    pub expansion_source: ExpansionSource,
}

/// Outcome for one batch seed: a report, or an error isolated to that seed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Success {
        seed_keyword: String,
        top_keywords: Vec<ScoredKeyword>,
        total_generated: usize,
        expansion_source: ExpansionSource,
    },
    Failure {
        seed_keyword: String,
        error: String,
    },
}

/// Trims and validates a seed phrase.
pub fn validate_seed(raw: &str) -> Result<String, AppError> {
    let seed = raw.trim();
    if seed.is_empty() {
        return Err(AppError::Validation("Please provide a keyword".to_string()));
    }
    Ok(seed.to_string())
}

/// Runs the full pipeline for an already validated seed.
pub async fn research_keyword(
    expander: &KeywordExpander,
    scorer: &KeywordScorer,
    seed: &str,
    cap: usize,
) -> KeywordReport {
    info!("Processing keyword: {seed}");

    let expansion = expander.expand(seed).await;
    let total_generated = expansion.keywords.len();
    info!(
        "Generated {total_generated} keyword variations for '{seed}' ({:?})",
        expansion.source
    );

    let scored = scorer.analyze(&expansion.keywords).await;
    let estimated = scored.iter().filter(|k| k.data_source.is_estimated()).count();
    if estimated > 0 {
        info!("{estimated}/{} keywords for '{seed}' use estimated metrics", scored.len());
    }

    KeywordReport {
        seed_keyword: seed.to_string(),
        keywords: rank_keywords(scored, cap),
        total_generated,
        expansion_source: expansion.source,
    }
}

/// Processes the first `MAX_BATCH_SEEDS` seeds one after another.
/// Entries that are not non-empty strings become `BatchItem::Failure`.
pub async fn research_batch(
    expander: &KeywordExpander,
    scorer: &KeywordScorer,
    seeds: &[serde_json::Value],
    cap: usize,
) -> Vec<BatchItem> {
    let mut results = Vec::with_capacity(seeds.len().min(MAX_BATCH_SEEDS));

    for raw in seeds.iter().take(MAX_BATCH_SEEDS) {
        let item = match raw.as_str() {
            None => BatchItem::Failure {
                seed_keyword: raw.to_string(),
                error: "Keyword must be a string".to_string(),
            },
            Some(text) => match validate_seed(text) {
                Err(e) => BatchItem::Failure {
                    seed_keyword: text.to_string(),
                    error: e.to_string(),
                },
                Ok(seed) => {
                    let report = research_keyword(expander, scorer, &seed, cap).await;
                    BatchItem::Success {
                        seed_keyword: report.seed_keyword,
                        top_keywords: report.keywords,
                        total_generated: report.total_generated,
                        expansion_source: report.expansion_source,
                    }
                }
            },
        };
        results.push(item);
    }

    results
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::expansion::expander::tests::StubGenerator;
    use crate::models::keyword::DataSource;
    use crate::ranking::{BATCH_ITEM_CAP, SINGLE_REQUEST_CAP};
    use crate::scoring::ScoringMode;
    use serde_json::json;

    fn offline() -> (KeywordExpander, KeywordScorer) {
        (
            KeywordExpander::new(Arc::new(StubGenerator::offline()), 100, 80),
            KeywordScorer::new(None, ScoringMode::ThreeFactor, 4, Some(5)),
        )
    }

    #[test]
    fn test_validate_seed() {
        assert_eq!(validate_seed("  coffee shop ").unwrap(), "coffee shop");
        assert!(validate_seed("   ").is_err());
        assert!(validate_seed("").is_err());
    }

    #[tokio::test]
    async fn test_coffee_shop_end_to_end_offline() {
        let (expander, scorer) = offline();
        let report = research_keyword(&expander, &scorer, "coffee shop", SINGLE_REQUEST_CAP).await;

        assert_eq!(report.seed_keyword, "coffee shop");
        assert_eq!(report.expansion_source, ExpansionSource::PatternFallback);
        assert_eq!(report.total_generated, 80);
        assert_eq!(report.keywords.len(), SINGLE_REQUEST_CAP);
        assert!(report
            .keywords
            .iter()
            .all(|k| k.data_source == DataSource::Estimated));
        assert!(report
            .keywords
            .windows(2)
            .all(|w| w[0].opportunity_score >= w[1].opportunity_score));
    }

    #[tokio::test]
    async fn test_batch_processes_first_ten_only() {
        let (expander, scorer) = offline();
        let seeds: Vec<_> = (0..12).map(|i| json!(format!("seed {i}"))).collect();
        let results = research_batch(&expander, &scorer, &seeds, BATCH_ITEM_CAP).await;

        assert_eq!(results.len(), 10);
        for item in &results {
            match item {
                BatchItem::Success { top_keywords, .. } => assert!(top_keywords.len() <= 10),
                BatchItem::Failure { .. } => panic!("unexpected failure"),
            }
        }
    }

    #[tokio::test]
    async fn test_batch_isolates_bad_items() {
        let (expander, scorer) = offline();
        let seeds = vec![json!("coffee"), json!(42), json!("  "), json!("tea")];
        let results = research_batch(&expander, &scorer, &seeds, BATCH_ITEM_CAP).await;

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], BatchItem::Success { .. }));
        assert!(matches!(results[1], BatchItem::Failure { .. }));
        assert!(matches!(results[2], BatchItem::Failure { .. }));
        assert!(matches!(results[3], BatchItem::Success { .. }));

        let value = serde_json::to_value(&results[1]).unwrap();
        assert_eq!(value["seed_keyword"], "42");
        assert!(value["error"].is_string());
    }
}
