//! Keyword similarity utilities for solution recall.
//!
//! Pure functions:
//! - problem digests (the solution store's keys)
//! - keyword extraction
//! - Jaccard similarity over keyword sets

use std::collections::HashSet;

/// Common words that carry no signal.
const STOP_WORDS: [&str; 5] = ["the", "and", "for", "with", "from"];

/// Words of this many characters or fewer are ignored.
const MAX_IGNORED_LEN: usize = 3;

const KEY_SEPARATOR: char = '_';

/// Derive the storage key for a problem description.
///
/// Lower-cases, collapses every run of non-alphanumeric characters into a
/// single `_`, trims separators from both ends, and truncates to `max_len`
/// characters. Different problems may share a key.
pub fn problem_key(problem: &str, max_len: usize) -> String {
    let mut key = String::with_capacity(problem.len());
    let mut pending_separator = false;

    for c in problem.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push(KEY_SEPARATOR);
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    let truncated: String = key.chars().take(max_len).collect();
    truncated.trim_end_matches(KEY_SEPARATOR).to_string()
}

/// Extract the keyword set of a text.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() > MAX_IGNORED_LEN)
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity: |A ∩ B| / |A ∪ B|.
///
/// Returns a value in [0, 1]. Two empty sets score 0, not NaN.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}
