// Opportunity scoring: candidate keywords → ScoredKeyword records.
// Live metrics come through ranking_api; the estimator covers every gap.

pub mod estimator;
pub mod opportunity;
pub mod scorer;

pub use opportunity::ScoringMode;
pub use scorer::KeywordScorer;
