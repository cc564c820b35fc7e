//! Ranking/selection: stable descending sort by opportunity score, then truncate.

use crate::models::keyword::ScoredKeyword;

/// Top results for a single-keyword request.
pub const SINGLE_REQUEST_CAP: usize = 50;
/// Top results per seed in a batch request.
pub const BATCH_ITEM_CAP: usize = 10;

/// Sorts by `opportunity_score` descending and keeps the first `cap`.
/// Equal scores keep their input order.
pub fn rank_keywords(mut keywords: Vec<ScoredKeyword>, cap: usize) -> Vec<ScoredKeyword> {
    // sort_by is stable
    keywords.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
    keywords.truncate(cap);
    keywords
}
