//! Deterministic pattern expansion used when the generative backend is unavailable.

use crate::expansion::parser::dedup_capped;

/// `{seed}` is replaced with the seed phrase.
const SEED_TEMPLATES: &[&str] = &[
    // basic variations
    "best {seed}",
    "how to {seed}",
    "{seed} for beginners",
    "affordable {seed}",
    "{seed} near me",
    "free {seed}",
    "professional {seed}",
    "{seed} tips and tricks",
    "{seed} guide",
    "{seed} tutorial",
    "{seed} reviews",
    "top 10 {seed}",
    // questions
    "what is {seed}",
    "why {seed} is important",
    "how to start {seed}",
    "where to learn {seed}",
    "is {seed} worth it",
    "how much does {seed} cost",
    "what is the cost of {seed}",
    "benefits of {seed}",
    // comparison
    "{seed} vs alternatives",
    "{seed} alternatives",
    "{seed} compared to",
    "best {seed} strategies",
    // commercial intent
    "buy {seed}",
    "{seed} price",
    "cheap {seed}",
    "{seed} deals",
    "{seed} for sale",
    "{seed} services",
    "{seed} company",
    "{seed} for small business",
    "{seed} on a budget",
    // recency
    "{seed} 2025",
    "{seed} trends 2025",
];

/// `{seed}` and `{city}` are replaced; expanded once per entry of `CITIES`.
const CITY_TEMPLATES: &[&str] = &[
    "{seed} in {city}",
    "best {seed} {city}",
    "{city} {seed} services",
    "{seed} near {city}",
];

const CITIES: &[&str] = &[
    "new york", "london", "tokyo", "dubai", "sydney", "paris", "berlin",
];

/// Lowest-priority templates; the first to be cut by the cap.
const LONG_TAIL_TEMPLATES: &[&str] = &[
    "{seed} best practices",
    "learn {seed} online",
    "{seed} course",
    "{seed} strategies",
    "{seed} tools",
    "{seed} software",
    "{seed} ideas",
    "{seed} examples",
    "{seed} techniques",
    "{seed} checklist",
    "{seed} step by step",
    "{seed} certification",
    "advanced {seed}",
    "{seed} for local business",
    "{seed} case study",
    "{seed} plan",
    "{seed} template",
    "{seed} masterclass",
    "{seed} workshop",
    "{seed} automation",
];

/// Every phrase the catalog can produce for `seed`, in priority order.
pub fn catalog(seed: &str) -> Vec<String> {
    let seed_phrases = SEED_TEMPLATES.iter().map(|t| t.replace("{seed}", seed));
    let city_phrases = CITIES.iter().flat_map(|city| {
        CITY_TEMPLATES
            .iter()
            .map(move |t| t.replace("{seed}", seed).replace("{city}", city))
    });
    let long_tail = LONG_TAIL_TEMPLATES.iter().map(|t| t.replace("{seed}", seed));

    seed_phrases.chain(city_phrases).chain(long_tail).collect()
}

/// Fallback expansion: the catalog, de-duplicated and capped.
pub fn generate_pattern_keywords(seed: &str, cap: usize) -> Vec<String> {
    dedup_capped(catalog(seed), cap)
}
