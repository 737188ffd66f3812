//! ISO 4 abbreviation of words and titles.
//!
//! Titles are processed from the last word backwards. When the last word ends
//! a registered phrase, the phrase swallows as many preceding words as the
//! phrase trie matches; otherwise the word is abbreviated on its own.

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::abbreviation::Abbreviation;
use crate::dictionary::{clean_word, Dictionary};
use crate::stopwords::remove_stopwords;

/// A phrase ending at the current word
struct PhraseMatch<'a> {
    /// Number of words before the last word that belong to the phrase
    depth: usize,
    abbreviation: &'a Abbreviation,
}

/// The title abbreviator
pub struct Abbreviator {
    /// The compiled dictionary (shared reference)
    dictionary: Arc<Dictionary>,
}

impl Abbreviator {
    /// Create a new abbreviator with the given dictionary
    pub fn new(dictionary: Dictionary) -> Self {
        Abbreviator {
            dictionary: Arc::new(dictionary),
        }
    }

    /// Create a new abbreviator with a shared dictionary reference
    pub fn with_arc(dictionary: Arc<Dictionary>) -> Self {
        Abbreviator { dictionary }
    }

    /// Get a reference to the dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Get the Arc reference to the dictionary (for sharing)
    pub fn dictionary_arc(&self) -> Arc<Dictionary> {
        Arc::clone(&self.dictionary)
    }

    /// Abbreviate a single word.
    ///
    /// Whole-word and stem entries win over endings. A word ending in a
    /// registered suffix keeps its head and gets the suffix abbreviation.
    /// Hyphenated compounds that match nothing as a whole are abbreviated
    /// part by part. Anything else comes back unchanged.
    pub fn abbreviate_word(&self, word: &str) -> String {
        let cword = clean_word(word);

        if let Some(abbrev) = self.dictionary.prefix.get(cword.chars()) {
            return abbrev.as_literal().unwrap_or(word).to_string();
        }

        if let Some((head_len, abbrev)) = self.match_suffix(cword) {
            if head_len > 0 {
                return match abbrev.as_literal() {
                    Some(ending) => {
                        let head: String = word.chars().take(head_len).collect();
                        format!("{}{}", head, ending)
                    }
                    None => word.to_string(),
                };
            }
        }

        if cword.contains('-') {
            return cword
                .split('-')
                .map(|part| self.abbreviate_word(part))
                .collect::<Vec<_>>()
                .join("-");
        }

        word.to_string()
    }

    /// Find the first (longest) ending of `cword` with a suffix entry.
    ///
    /// Returns the number of characters before the ending and its
    /// abbreviation. The scan stops at the first hit, even when that hit
    /// is the whole word.
    fn match_suffix<'a>(&'a self, cword: &str) -> Option<(usize, &'a Abbreviation)> {
        cword
            .char_indices()
            .enumerate()
            .find_map(|(n, (i, _))| {
                self.dictionary
                    .suffix
                    .get(cword[i..].chars())
                    .map(|abbrev| (n, abbrev))
            })
    }

    /// Look for a phrase ending with `last` and preceded by `rest`
    fn match_phrase<'a, S: AsRef<str>>(&'a self, last: &str, rest: &[S]) -> Option<PhraseMatch<'a>> {
        let phrase = self.dictionary.last_word.get(last.chars())?;
        let preceding = rest.iter().rev().map(|w| w.as_ref().to_string());
        match phrase.search_deepest(preceding) {
            (depth, Some(abbreviation)) => Some(PhraseMatch {
                depth,
                abbreviation,
            }),
            (_, None) => None,
        }
    }

    /// Abbreviate a sequence of words.
    ///
    /// A matched phrase collapses into its abbreviation, or is kept word
    /// for word when marked as not abbreviated. The output is never longer
    /// than the input.
    pub fn abbreviate<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        // Built back to front, reversed at the end
        let mut out: Vec<String> = Vec::with_capacity(words.len());
        let mut end = words.len();

        while end > 0 {
            let last = words[end - 1].as_ref();
            let rest = &words[..end - 1];

            let Some(phrase) = self.match_phrase(last, rest) else {
                out.push(self.abbreviate_word(last));
                end -= 1;
                continue;
            };

            let start = rest.len() - phrase.depth;
            match phrase.abbreviation {
                Abbreviation::DoNotAbbreviate => {
                    out.push(last.to_string());
                    out.extend(rest[start..].iter().rev().map(|w| w.as_ref().to_string()));
                }
                Abbreviation::Literal(abbrev) => out.push(abbrev.clone()),
            }
            end = start;
        }

        out.reverse();
        out
    }

    /// Abbreviate a full title line.
    ///
    /// Single-word titles are returned as they are. Longer titles are
    /// abbreviated, cleared of stopwords and title-cased.
    pub fn abbreviate_title(&self, line: &str) -> String {
        let normalized: String = line.nfc().collect();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        match words.as_slice() {
            [] => String::new(),
            [single] => single.to_string(),
            _ => {
                let abbreviated = self.abbreviate(&words);
                title_case(&remove_stopwords(&abbreviated).join(" "))
            }
        }
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// A first letter whose upper case spans several characters keeps only the
/// first of them in upper case (`ß` becomes `Ss`).
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                let mut upper = c.to_uppercase();
                out.extend(upper.next());
                out.extend(upper.flat_map(char::to_lowercase));
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
