use serde::{Deserialize, Serialize};

/// Human-readable bucket derived from competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

impl Difficulty {
    /// Strict less-than boundaries: <30, <50, <70, <85, else Very Hard.
    pub fn from_competition(competition: f64) -> Self {
        if competition < 30.0 {
            Difficulty::VeryEasy
        } else if competition < 50.0 {
            Difficulty::Easy
        } else if competition < 70.0 {
            Difficulty::Medium
        } else if competition < 85.0 {
            Difficulty::Hard
        } else {
            Difficulty::VeryHard
        }
    }
}

/// Which backend produced a keyword's numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "SE Ranking API")]
    RankingApi,
    /// No ranking API configured.
    #[serde(rename = "Estimated")]
    Estimated,
    /// Ranking API configured, but the lookup for this keyword failed.
    #[serde(rename = "Estimated (API Fallback)")]
    EstimatedFallback,
}

impl DataSource {
    pub fn is_estimated(self) -> bool {
        !matches!(self, DataSource::RankingApi)
    }
}

/// One scored candidate. Created once during scoring, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub monthly_volume: u64,
    /// 0 – 100
    pub competition: f64,
    /// Omitted when the scorer runs in two-factor mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    /// 0 – 100, two decimals
    pub opportunity_score: f64,
    pub difficulty: Difficulty,
    pub data_source: DataSource,
}
