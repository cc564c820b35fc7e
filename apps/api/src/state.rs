use std::sync::Arc;

use crate::config::Config;
use crate::expansion::KeywordExpander;
use crate::scoring::KeywordScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub expander: Arc<KeywordExpander>,
    pub scorer: Arc<KeywordScorer>,
    pub config: Config,
}
