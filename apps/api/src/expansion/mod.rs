// Keyword expansion: seed phrase → de-duplicated, bounded candidate set.
// Generative backend first; the pattern catalog whenever it is unavailable.
// All backend calls go through llm_client.

pub mod expander;
pub mod parser;
pub mod patterns;
pub mod prompts;

pub use expander::{ExpansionSource, KeywordExpander};
