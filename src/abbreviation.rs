//! The value stored at the end of every dictionary path.
//!
//! An LTWA row either gives a replacement string or marks the word as
//! "not abbreviated" (`n.a.`). The marker is a real answer, distinct from
//! "the word is not in the list", so it gets its own variant.

use serde::{Deserialize, Serialize};

/// The literal the LTWA uses for "do not abbreviate"
pub const NOT_ABBREVIATED: &str = "n.a.";

/// The abbreviation registered for a word, stem or phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Abbreviation {
    /// Replace the matched text with this string
    Literal(String),
    /// The matched text is known and must be kept as written
    DoNotAbbreviate,
}

impl Abbreviation {
    /// Parse the abbreviation column of a dictionary row.
    ///
    /// Returns `None` for an empty column.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.eq_ignore_ascii_case(NOT_ABBREVIATED) {
            Some(Abbreviation::DoNotAbbreviate)
        } else {
            Some(Abbreviation::Literal(raw.to_string()))
        }
    }

    /// Get the replacement string, if any
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Abbreviation::Literal(s) => Some(s),
            Abbreviation::DoNotAbbreviate => None,
        }
    }
}

impl std::fmt::Display for Abbreviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Abbreviation::Literal(s) => write!(f, "{}", s),
            Abbreviation::DoNotAbbreviate => write!(f, "{}", NOT_ABBREVIATED),
        }
    }
}
