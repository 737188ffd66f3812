//! LTWA rows and the three tries built from them.
//!
//! Single words go to the prefix trie (`Yankee`, `alcoholi-`), entries with a
//! leading hyphen to the suffix trie (`-field`, `-graph-`), and multi-word
//! phrases are filed under their last word (`Africa` for `South Africa-`),
//! pointing to a phrase trie over the remaining words read right to left.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::abbreviation::Abbreviation;
use crate::trie::Trie;

/// Trie keyed by the characters of a word or stem
pub type WordTrie = Trie<char, Abbreviation>;

/// Trie keyed by the words preceding a phrase's last word, in reverse order
pub type PhraseTrie = Trie<String, Abbreviation>;

/// Trie keyed by the characters of a phrase's last word
pub type LastWordTrie = Trie<char, PhraseTrie>;

/// Strip a parenthetical gloss and surrounding whitespace.
///
/// `"Labor (work)"` becomes `"Labor"`.
pub fn clean_word(word: &str) -> &str {
    word.split('(').next().unwrap_or(word).trim()
}

/// Turn a trailing hyphen (stem marker) into the wildcard key
fn stem_marker(word: &str) -> String {
    match word.strip_suffix('-') {
        Some(stem) => format!("{}*", stem),
        None => word.to_string(),
    }
}

/// Check if a TSV line is the LTWA column header
fn is_header(line: &str) -> bool {
    line.split('\t')
        .nth(1)
        .is_some_and(|column| column.trim().to_ascii_lowercase().starts_with("abbreviation"))
}

/// A parsed LTWA row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Word, stem or phrase as written in the list (gloss included)
    pub text: String,
    /// Abbreviation column (`None` when empty)
    pub abbreviation: Option<Abbreviation>,
    /// Language codes, carried but not used for matching
    pub language: String,
}

impl DictionaryEntry {
    /// Create an entry from its columns
    pub fn new(text: &str, abbreviation: &str, language: &str) -> Self {
        DictionaryEntry {
            text: text.to_string(),
            abbreviation: Abbreviation::parse(abbreviation),
            language: language.trim().to_string(),
        }
    }

    /// Parse a tab-separated `WORD\tABBREVIATION\tLANGUAGES` line.
    ///
    /// Returns `None` when the line has fewer than two columns.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut parts = line.split('\t');
        let text = parts.next()?;
        let abbreviation = parts.next()?;
        let language = parts.next().unwrap_or("");
        Some(DictionaryEntry::new(text, abbreviation, language))
    }
}

/// Number of entries routed into each trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
    /// Words and stems
    pub prefixes: usize,
    /// Word endings
    pub suffixes: usize,
    /// Multi-word phrases
    pub phrases: usize,
    /// Rows dropped for a missing abbreviation or empty text
    pub skipped: usize,
}

/// The compiled dictionary: three tries, read-only once built
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    /// Whole words and stems
    pub prefix: WordTrie,
    /// Word endings, matched against the tail of a word
    pub suffix: WordTrie,
    /// Phrases, filed under their last word
    pub last_word: LastWordTrie,
    /// Build summary
    pub stats: DictionaryStats,
}

impl Dictionary {
    /// Build a dictionary from TSV content in one go
    pub fn from_tsv(content: &str) -> Self {
        let mut builder = DictionaryBuilder::new();
        builder.load_tsv(content);
        builder.build()
    }

    /// Check if no entry was loaded
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty() && self.last_word.is_empty()
    }
}

/// Builder routing dictionary rows into the three tries
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dictionary: Dictionary,
}

impl DictionaryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        DictionaryBuilder::default()
    }

    /// Add a word, stem or phrase with its abbreviation column
    pub fn add(&mut self, text: &str, abbreviation: &str) {
        self.add_entry(DictionaryEntry::new(text, abbreviation, ""));
    }

    /// Add a parsed row
    pub fn add_entry(&mut self, entry: DictionaryEntry) {
        let Some(abbreviation) = entry.abbreviation else {
            log::debug!("skipping {:?}: no abbreviation", entry.text);
            self.dictionary.stats.skipped += 1;
            return;
        };

        let text: String = clean_word(&entry.text).nfc().collect();
        let mut words: Vec<&str> = text.split_whitespace().collect();

        let Some(last) = words.pop() else {
            log::debug!("skipping row with empty text");
            self.dictionary.stats.skipped += 1;
            return;
        };

        let stats = &mut self.dictionary.stats;
        if words.is_empty() {
            if let Some(ending) = last.strip_prefix('-') {
                let key = stem_marker(ending);
                if self.dictionary.suffix.insert(key.chars(), abbreviation).is_some() {
                    log::debug!("suffix entry -{} overrides an earlier row", key);
                } else {
                    stats.suffixes += 1;
                }
            } else {
                let key = stem_marker(last);
                if self.dictionary.prefix.insert(key.chars(), abbreviation).is_some() {
                    log::debug!("prefix entry {} overrides an earlier row", key);
                } else {
                    stats.prefixes += 1;
                }
            }
            return;
        }

        let key = stem_marker(last);
        let phrase = self
            .dictionary
            .last_word
            .get_or_insert_with(key.chars(), PhraseTrie::new);
        let preceding = words.iter().rev().map(|w| w.to_string());
        if phrase.insert(preceding, abbreviation).is_some() {
            log::debug!("phrase entry {:?} overrides an earlier row", text);
        } else {
            stats.phrases += 1;
        }
    }

    /// Load rows from TSV content.
    ///
    /// Blank lines and `#` comments are skipped, and so is the first row
    /// when it is a column header (`WORD\tABBREVIATIONS\t...`).
    pub fn load_tsv(&mut self, content: &str) {
        let mut first_row = true;
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            if std::mem::take(&mut first_row) && is_header(line) {
                log::debug!("line {}: skipping header", n + 1);
                continue;
            }

            match DictionaryEntry::parse_line(line) {
                Some(entry) => self.add_entry(entry),
                None => {
                    log::warn!("line {}: expected tab-separated columns, skipping", n + 1);
                    self.dictionary.stats.skipped += 1;
                }
            }
        }
    }

    /// Build and return the dictionary
    pub fn build(self) -> Dictionary {
        let stats = self.dictionary.stats;
        log::info!(
            "dictionary built: {} prefixes, {} suffixes, {} phrases ({} rows skipped)",
            stats.prefixes,
            stats.suffixes,
            stats.phrases,
            stats.skipped
        );
        self.dictionary
    }
}
