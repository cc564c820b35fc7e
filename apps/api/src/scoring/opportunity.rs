//! Opportunity score: one 0–100 number blending volume, competition and CPC.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Volume at which the volume factor saturates.
const VOLUME_CEILING: f64 = 10_000.0;
/// CPC at which the commercial-value factor saturates.
const CPC_CEILING: f64 = 10.0;

/// Which opportunity formula the scorer applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// 0.4 volume + 0.6 inverted competition. CPC is not tracked.
    TwoFactor,
    /// 0.4 volume + 0.4 inverted competition + 0.2 CPC.
    #[default]
    ThreeFactor,
}

impl ScoringMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringMode::TwoFactor => "two_factor",
            ScoringMode::ThreeFactor => "three_factor",
        }
    }

    pub fn tracks_cpc(self) -> bool {
        matches!(self, ScoringMode::ThreeFactor)
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two_factor" | "two-factor" | "2" => Ok(ScoringMode::TwoFactor),
            "three_factor" | "three-factor" | "3" => Ok(ScoringMode::ThreeFactor),
            other => Err(format!(
                "unknown scoring mode '{other}' (expected two_factor or three_factor)"
            )),
        }
    }
}

/// Computes the opportunity score. `cpc = None` selects the two-factor form.
/// Inputs are clamped to their valid ranges, so the result is always in [0, 100].
pub fn opportunity_score(volume: u64, competition: f64, cpc: Option<f64>) -> f64 {
    let volume_score = (volume as f64 / VOLUME_CEILING).min(1.0);
    let competition_score = 1.0 - competition.clamp(0.0, 100.0) / 100.0;

    let blended = match cpc {
        Some(cpc) => {
            let cpc_score = (cpc.max(0.0) / CPC_CEILING).min(1.0);
            0.4 * volume_score + 0.4 * competition_score + 0.2 * cpc_score
        }
        None => 0.4 * volume_score + 0.6 * competition_score,
    };

    round2(100.0 * blended).clamp(0.0, 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
