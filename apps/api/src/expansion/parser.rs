//! Turns raw generated text into candidate keywords.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidates must be strictly longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 2;

/// `12. ` style list prefix at the start of any line.
static LIST_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*").expect("Invalid list numbering regex"));

static QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']"#).expect("Invalid quote regex"));

/// Parses a generated keyword list.
///
/// Strips `N.` numbering prefixes and quote characters, then splits on
/// newlines and commas. Fragments are trimmed and kept when longer than
/// `MIN_KEYWORD_CHARS`. Duplicates (exact, case-sensitive) keep their first
/// position. At most `cap` candidates are returned.
pub fn parse_keyword_list(raw: &str, cap: usize) -> Vec<String> {
    let unnumbered = LIST_NUMBERING.replace_all(raw, "");
    let cleaned = QUOTES.replace_all(&unnumbered, "");

    let fragments = cleaned
        .lines()
        .flat_map(|line| line.split(','))
        .map(|fragment| fragment.trim().to_string());

    dedup_capped(fragments, cap)
}

/// Keeps the first occurrence of each keyword longer than `MIN_KEYWORD_CHARS`,
/// stopping once `cap` keywords are collected.
pub fn dedup_capped<I>(keywords: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for keyword in keywords {
        if out.len() >= cap {
            break;
        }
        if keyword.chars().count() <= MIN_KEYWORD_CHARS {
            continue;
        }
        if seen.insert(keyword.clone()) {
            out.push(keyword);
        }
    }
    out
}
