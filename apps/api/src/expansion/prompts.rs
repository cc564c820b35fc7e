// Prompt constants for keyword expansion.

/// Expansion prompt template. Replace `{seed_keyword}` before sending.
pub const EXPANSION_PROMPT_TEMPLATE: &str = r#"Generate SEO keyword variations for "{seed_keyword}". Return ONLY a comma-separated list.

Include these types:
- Long-tail keywords (3-5 words)
- Question-based keywords (how, what, why, when)
- Geographic variations (cities, countries)
- "Near me" and local keywords
- Comparison keywords (vs, alternatives, best)
- Price and cost related
- Review and rating keywords
- Beginner-friendly keywords
- Current-year trend keywords

Example for "coffee shop": best coffee shops near me, how to start a coffee shop, coffee shop business plan, affordable coffee machines

Now generate for: "{seed_keyword}""#;

pub fn build_expansion_prompt(seed: &str) -> String {
    EXPANSION_PROMPT_TEMPLATE.replace("{seed_keyword}", seed)
}
