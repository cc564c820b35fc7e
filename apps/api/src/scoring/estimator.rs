//! Heuristic metrics for keywords without live ranking data.
//!
//! Volume is a pure function of the phrase. Competition is drawn uniformly
//! from a band chosen by word count, so the random source is injected by the
//! caller; tests pin it with `StdRng::seed_from_u64`.

use rand::Rng;

use crate::scoring::opportunity::round2;

const BASE_VOLUME: u64 = 1000;
const INFORMATIONAL_VOLUME: u64 = 2500;
const COMMERCIAL_VOLUME: u64 = 1800;
const LOCAL_VOLUME: u64 = 1200;
const MIN_LONG_TAIL_VOLUME: u64 = 100;

const INFORMATIONAL_MARKERS: &[&str] = &["how to", "what is", "why", "tutorial"];
const COMMERCIAL_INTENT_MARKERS: &[&str] = &["buy", "price", "cost", "for sale"];
const LOCAL_MARKERS: &[&str] = &["near me", "local", "city"];

/// Terms that raise competition.
const COMMERCIAL_TERMS: &[&str] = &["buy", "price", "cost", "deal", "discount", "cheap", "sale"];
const COMMERCIAL_BOOST: u32 = 20;
const MAX_COMPETITION: u32 = 95;

const MIN_CPC: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMetrics {
    pub volume: u64,
    pub competition: u32,
    pub cpc: f64,
}

/// Estimates volume, competition and CPC for `keyword`.
pub fn estimate_metrics<R: Rng + ?Sized>(keyword: &str, rng: &mut R) -> EstimatedMetrics {
    let lower = keyword.to_lowercase();
    let word_count = keyword.split_whitespace().count();

    let volume = estimate_volume(&lower, word_count);
    let competition = competition_with_boost(&lower, base_competition(word_count, rng));
    let cpc = estimate_cpc(competition);

    EstimatedMetrics {
        volume,
        competition,
        cpc,
    }
}

/// Intent-adjusted base volume, divided down for long-tail phrases.
/// `lower` must already be lowercased.
pub fn estimate_volume(lower: &str, word_count: usize) -> u64 {
    let base = if contains_any(lower, INFORMATIONAL_MARKERS) {
        INFORMATIONAL_VOLUME
    } else if contains_any(lower, COMMERCIAL_INTENT_MARKERS) {
        COMMERCIAL_VOLUME
    } else if contains_any(lower, LOCAL_MARKERS) {
        LOCAL_VOLUME
    } else {
        BASE_VOLUME
    };

    if word_count > 3 {
        (base / (word_count as u64 - 1)).max(MIN_LONG_TAIL_VOLUME)
    } else {
        base
    }
}

/// Inclusive competition band for a phrase of `word_count` words.
pub fn competition_band(word_count: usize) -> (u32, u32) {
    match word_count {
        0..=2 => (75, 95),
        3 => (45, 75),
        _ => (15, 45),
    }
}

fn base_competition<R: Rng + ?Sized>(word_count: usize, rng: &mut R) -> u32 {
    let (low, high) = competition_band(word_count);
    rng.gen_range(low..=high)
}

/// Adds the commercial-term boost, capped at 95. `lower` must already be lowercased.
pub fn competition_with_boost(lower: &str, competition: u32) -> u32 {
    if contains_any(lower, COMMERCIAL_TERMS) {
        (competition + COMMERCIAL_BOOST).min(MAX_COMPETITION)
    } else {
        competition
    }
}

pub fn estimate_cpc(competition: u32) -> f64 {
    round2((competition as f64 / 50.0).max(MIN_CPC))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_volume_by_intent() {
        assert_eq!(estimate_volume("how to brew", 3), 2500);
        assert_eq!(estimate_volume("coffee price", 2), 1800);
        assert_eq!(estimate_volume("coffee near me", 3), 1200);
        assert_eq!(estimate_volume("best coffee shop", 3), 1000);
    }

    #[test]
    fn test_informational_beats_commercial() {
        assert_eq!(estimate_volume("how to buy coffee", 4), 2500 / 3);
    }

    #[test]
    fn test_long_tail_volume_divided_with_floor() {
        // 5 words → 1000 / 4
        assert_eq!(estimate_volume("best coffee shop in town", 5), 250);
        // 12 words → 1000 / 11 = 90, floored at 100
        assert_eq!(estimate_volume("a b c d e f g h i j k l", 12), 100);
    }

    #[test]
    fn test_competition_bands_respected() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let short = estimate_metrics("coffee shop", &mut rng).competition;
            assert!((75..=95).contains(&short), "short {short}");
            let mid = estimate_metrics("best coffee shop", &mut rng).competition;
            assert!((45..=75).contains(&mid), "mid {mid}");
            let long = estimate_metrics("best coffee shop in town", &mut rng).competition;
            assert!((15..=45).contains(&long), "long {long}");
        }
    }

    #[test]
    fn test_price_boosts_competition_by_twenty() {
        assert_eq!(competition_with_boost("coffee grinder price", 50), 70);
        assert_eq!(competition_with_boost("coffee grinder", 50), 50);
        assert_eq!(competition_with_boost("cheap coffee", 90), 95);
    }

    #[test]
    fn test_boost_relative_to_same_draw() {
        // Same seed, same word count: the only difference is the commercial term.
        let mut plain_rng = StdRng::seed_from_u64(99);
        let mut priced_rng = StdRng::seed_from_u64(99);
        let plain = estimate_metrics("coffee grinder review online", &mut plain_rng);
        let priced = estimate_metrics("coffee grinder price online", &mut priced_rng);
        assert_eq!(priced.competition, (plain.competition + 20).min(95));
    }

    #[test]
    fn test_cpc_from_competition() {
        assert_eq!(estimate_cpc(15), 0.5);
        assert_eq!(estimate_cpc(60), 1.2);
        assert_eq!(estimate_cpc(95), 1.9);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = estimate_metrics("best coffee shop", &mut StdRng::seed_from_u64(1));
        let b = estimate_metrics("best coffee shop", &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_word_count_band_edges() {
        assert_eq!(competition_band(1), (75, 95));
        assert_eq!(competition_band(2), (75, 95));
        assert_eq!(competition_band(3), (45, 75));
        assert_eq!(competition_band(4), (15, 45));
    }
}
