//! Maps provider-specific response bodies onto volume / competition / CPC.
//!
//! Field names differ between providers and between endpoints of the same
//! provider, so the mapping sits behind `MetricsAdapter`. Missing or
//! non-numeric fields take the documented defaults; a body of the wrong shape
//! yields `None`, which the client treats as a failed lookup.

use serde_json::Value;

pub const DEFAULT_VOLUME: u64 = 100;
pub const DEFAULT_COMPETITION: f64 = 50.0;
pub const DEFAULT_CPC: f64 = 1.0;

/// Live metrics for one keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordMetrics {
    pub volume: u64,
    /// 0 – 100
    pub competition: f64,
    pub cpc: f64,
}

pub trait MetricsAdapter: Send + Sync {
    /// Extracts metrics from a suggestions-endpoint body.
    fn from_suggestions(&self, body: &Value) -> Option<KeywordMetrics>;

    /// Extracts metrics from an analysis-endpoint body.
    fn from_analysis(&self, body: &Value) -> Option<KeywordMetrics>;
}

/// SE Ranking field mapping.
///
/// Suggestions: a non-empty array; the first element carries `search_volume`,
/// `competition_level` and `cpc`. Analysis: an object carrying
/// `search_volume`, `competition` and `cpc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeRankingAdapter;

impl MetricsAdapter for SeRankingAdapter {
    fn from_suggestions(&self, body: &Value) -> Option<KeywordMetrics> {
        let first = body.as_array()?.first()?;
        first
            .is_object()
            .then(|| metrics_from(first, "search_volume", "competition_level", "cpc"))
    }

    fn from_analysis(&self, body: &Value) -> Option<KeywordMetrics> {
        body.is_object()
            .then(|| metrics_from(body, "search_volume", "competition", "cpc"))
    }
}

fn metrics_from(object: &Value, volume_key: &str, competition_key: &str, cpc_key: &str) -> KeywordMetrics {
    let volume = number_field(object, volume_key)
        .map(|v| v.max(0.0).round() as u64)
        .unwrap_or(DEFAULT_VOLUME);
    let competition = number_field(object, competition_key)
        .map(|c| c.clamp(0.0, 100.0))
        .unwrap_or(DEFAULT_COMPETITION);
    let cpc = number_field(object, cpc_key)
        .map(|c| c.max(0.0))
        .unwrap_or(DEFAULT_CPC);

    KeywordMetrics {
        volume,
        competition,
        cpc,
    }
}

/// Reads a finite number, accepting numeric strings.
fn number_field(object: &Value, key: &str) -> Option<f64> {
    let value = object.get(key)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
