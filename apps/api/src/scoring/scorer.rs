//! Keyword Scorer — one `ScoredKeyword` per candidate, in input order.
//!
//! Live lookups run concurrently (bounded by `concurrency`); each candidate
//! whose lookup fails is estimated on its own, so one bad response never
//! aborts the batch. Estimation runs afterwards in input order from a single
//! per-call RNG, which keeps seeded runs reproducible.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::models::keyword::{DataSource, Difficulty, ScoredKeyword};
use crate::ranking_api::{KeywordMetrics, MetricsSource, RankingError};
use crate::scoring::estimator::{estimate_metrics, EstimatedMetrics};
use crate::scoring::opportunity::{opportunity_score, ScoringMode};

pub struct KeywordScorer {
    source: Option<Arc<dyn MetricsSource>>,
    mode: ScoringMode,
    concurrency: usize,
    rng_seed: Option<u64>,
}

impl KeywordScorer {
    pub fn new(
        source: Option<Arc<dyn MetricsSource>>,
        mode: ScoringMode,
        concurrency: usize,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            source,
            mode,
            concurrency: concurrency.max(1),
            rng_seed,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn has_live_source(&self) -> bool {
        self.source.is_some()
    }

    /// Scores every candidate. Output length and order match the input.
    pub async fn analyze(&self, candidates: &[String]) -> Vec<ScoredKeyword> {
        let lookups = self.fetch_all(candidates).await;

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        candidates
            .iter()
            .zip(lookups)
            .map(|(keyword, lookup)| match lookup {
                Some(Ok(metrics)) => self.build(keyword, metrics, DataSource::RankingApi),
                Some(Err(e)) => {
                    warn!("Ranking lookup failed for '{keyword}' ({e}); using estimate");
                    let estimated = estimate_metrics(keyword, &mut rng);
                    self.build(keyword, estimated.into(), DataSource::EstimatedFallback)
                }
                None => {
                    let estimated = estimate_metrics(keyword, &mut rng);
                    self.build(keyword, estimated.into(), DataSource::Estimated)
                }
            })
            .collect()
    }

    /// `None` per candidate when no live source is configured.
    async fn fetch_all(
        &self,
        candidates: &[String],
    ) -> Vec<Option<Result<KeywordMetrics, RankingError>>> {
        let Some(source) = &self.source else {
            return candidates.iter().map(|_| None).collect();
        };

        debug!(
            "Fetching live metrics for {} keywords (concurrency {})",
            candidates.len(),
            self.concurrency
        );

        // Owned keywords and source handles keep the lookup futures 'static,
        // which axum handlers need.
        let source = Arc::clone(source);
        stream::iter(candidates.iter().cloned())
            .map(move |keyword| {
                let source = Arc::clone(&source);
                async move { Some(source.fetch(&keyword).await) }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    fn build(&self, keyword: &str, metrics: KeywordMetrics, data_source: DataSource) -> ScoredKeyword {
        let cpc = self.mode.tracks_cpc().then_some(metrics.cpc);
        ScoredKeyword {
            keyword: keyword.to_string(),
            monthly_volume: metrics.volume,
            competition: metrics.competition,
            cpc,
            opportunity_score: opportunity_score(metrics.volume, metrics.competition, cpc),
            difficulty: Difficulty::from_competition(metrics.competition),
            data_source,
        }
    }
}

impl From<EstimatedMetrics> for KeywordMetrics {
    fn from(estimated: EstimatedMetrics) -> Self {
        KeywordMetrics {
            volume: estimated.volume,
            competition: estimated.competition as f64,
            cpc: estimated.cpc,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scoring::opportunity::round2;
    use async_trait::async_trait;

    /// Fails every keyword containing `fail_on`; returns fixed metrics otherwise.
    pub struct StubSource {
        pub fail_on: &'static str,
        pub metrics: KeywordMetrics,
    }

    #[async_trait]
    impl MetricsSource for StubSource {
        async fn fetch(&self, keyword: &str) -> Result<KeywordMetrics, RankingError> {
            if keyword.contains(self.fail_on) {
                Err(RankingError::Api { status: 503 })
            } else {
                Ok(self.metrics)
            }
        }
    }

    fn live_metrics() -> KeywordMetrics {
        KeywordMetrics {
            volume: 5000,
            competition: 40.0,
            cpc: 2.0,
        }
    }

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_source_estimates_everything() {
        let scorer = KeywordScorer::new(None, ScoringMode::ThreeFactor, 4, Some(3));
        let scored = scorer
            .analyze(&keywords(&["best coffee shop", "coffee shop near me"]))
            .await;
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|k| k.data_source == DataSource::Estimated));
        assert!(scored.iter().all(|k| k.cpc.is_some()));
    }

    #[tokio::test]
    async fn test_failures_are_per_candidate() {
        let source = StubSource {
            fail_on: "broken",
            metrics: live_metrics(),
        };
        let scorer = KeywordScorer::new(Some(Arc::new(source)), ScoringMode::ThreeFactor, 2, Some(1));
        let scored = scorer
            .analyze(&keywords(&["good one", "broken one", "another good"]))
            .await;

        assert_eq!(scored[0].keyword, "good one");
        assert_eq!(scored[0].data_source, DataSource::RankingApi);
        assert_eq!(scored[1].data_source, DataSource::EstimatedFallback);
        assert_eq!(scored[2].data_source, DataSource::RankingApi);
        // 0.4*0.5 + 0.4*0.6 + 0.2*0.2 = 0.48
        assert_eq!(scored[0].opportunity_score, 48.0);
        assert_eq!(scored[0].difficulty, Difficulty::Easy);
    }

    #[tokio::test]
    async fn test_two_factor_omits_cpc() {
        let source = StubSource {
            fail_on: "never-matches",
            metrics: live_metrics(),
        };
        let scorer = KeywordScorer::new(Some(Arc::new(source)), ScoringMode::TwoFactor, 4, None);
        let scored = scorer.analyze(&keywords(&["coffee"])).await;
        assert_eq!(scored[0].cpc, None);
        // 0.4*0.5 + 0.6*0.6 = 0.56
        assert_eq!(scored[0].opportunity_score, 56.0);
    }

    #[tokio::test]
    async fn test_best_coffee_shop_estimate() {
        let scorer = KeywordScorer::new(None, ScoringMode::ThreeFactor, 4, Some(42));
        let scored = &scorer.analyze(&keywords(&["best coffee shop"])).await[0];
        assert_eq!(scored.monthly_volume, 1000);
        assert!((45.0..=75.0).contains(&scored.competition));
        let cpc = scored.cpc.unwrap();
        assert_eq!(cpc, round2((scored.competition / 50.0).max(0.5)));
        assert_eq!(
            scored.opportunity_score,
            opportunity_score(1000, scored.competition, Some(cpc))
        );
        assert_eq!(scored.difficulty, Difficulty::from_competition(scored.competition));
    }

    #[tokio::test]
    async fn test_seeded_scorer_is_reproducible() {
        let candidates = keywords(&["coffee", "best coffee shop", "coffee shop in new york city"]);
        let a = KeywordScorer::new(None, ScoringMode::ThreeFactor, 4, Some(11))
            .analyze(&candidates)
            .await;
        let b = KeywordScorer::new(None, ScoringMode::ThreeFactor, 4, Some(11))
            .analyze(&candidates)
            .await;
        assert_eq!(a, b);
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_analyze_future_is_send() {
        let source = StubSource {
            fail_on: "x",
            metrics: live_metrics(),
        };
        let scorer = KeywordScorer::new(Some(Arc::new(source)), ScoringMode::ThreeFactor, 2, None);
        let candidates = keywords(&["coffee"]);
        assert_send(&scorer.analyze(&candidates));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let scorer = KeywordScorer::new(None, ScoringMode::TwoFactor, 4, None);
        assert!(scorer.analyze(&[]).await.is_empty());
    }
}
