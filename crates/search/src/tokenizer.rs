//! Basic tokenizer for track search
//!
//! Pipeline: whitespace runs → remove non-alphanumeric characters → lowercase
//!           → drop empty tokens
//!
//! No stemming and no stopwords: the same pipeline runs over album, artist
//! and title text and over queries, so matching stays predictable.

use std::collections::HashSet;

/// Normalize a single whitespace-delimited run.
#[inline]
fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tokenize text into searchable terms.
///
/// The returned iterator is lazy and borrows `text`; call again to restart.
///
/// # Example
///
/// ```
/// use tracksearch_search::tokenizer::tokenize;
///
/// let tokens: Vec<String> = tokenize("AC/DC - Back in Black!").collect();
/// assert_eq!(tokens, vec!["acdc", "back", "in", "black"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(normalize)
        .filter(|s| !s.is_empty())
}

/// Tokenize and deduplicate for query processing
///
/// # Example
///
/// ```
/// use tracksearch_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("love Love LOVE me do");
/// assert_eq!(tokens, vec!["love", "me", "do"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text).filter(|t| seen.insert(t.clone())).collect()
}
