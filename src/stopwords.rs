//! Title cleanup after abbreviation.
//!
//! ISO 4 drops articles, conjunctions and prepositions from abbreviated
//! titles. Only common English forms are listed for now.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Articles
pub static ARTICLES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["a", "the", "an"].into_iter().collect());

/// Conjunctions
pub static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "for", "and", "nor", "but", "or", "yet", "so", "until", "when", "whenever", "since", "&",
    ]
    .into_iter()
    .collect()
});

/// Prepositions
pub static PREPOSITIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["from", "of", "by", "on", "in", "at"].into_iter().collect());

/// Check if `word` is an article, conjunction or preposition
pub fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    let lower = lower.as_str();
    ARTICLES.contains(lower) || CONJUNCTIONS.contains(lower) || PREPOSITIONS.contains(lower)
}

/// Remove stopwords from an abbreviated title.
///
/// The first token is always kept, whatever it is.
pub fn remove_stopwords<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let Some((first, rest)) = words.split_first() else {
        return Vec::new();
    };

    let mut kept = vec![first.as_ref().to_string()];
    for word in rest {
        let word = word.as_ref();
        if !is_stopword(word) {
            kept.push(word.to_string());
        }
    }
    kept
}
