//! # iso4-rs
//!
//! ISO 4 abbreviation of journal and serial titles.
//!
//! Abbreviations come from the List of Title Word Abbreviations (LTWA),
//! compiled into three tries: whole words and stems, word endings, and
//! multi-word phrases filed under their last word.
//!
//! ## Quick Start
//!
//! ```rust
//! use iso4_rs::{Abbreviator, DictionaryBuilder};
//!
//! // Build the dictionary from LTWA rows
//! let tsv = "Universit-\tuniv.\tmul\n-ship\tsh.\teng\nUnited States of America\tU. S. A.\teng";
//! let mut builder = DictionaryBuilder::new();
//! builder.load_tsv(tsv);
//! let dictionary = builder.build();
//!
//! let abbreviator = Abbreviator::new(dictionary);
//! let words = ["University", "of", "airship", "united", "states", "of", "america"];
//! assert_eq!(
//!     abbreviator.abbreviate(&words),
//!     vec!["univ.", "of", "airsh.", "U. S. A."]
//! );
//!
//! // Full titles also drop stopwords and get title-cased
//! assert_eq!(
//!     abbreviator.abbreviate_title("University of the United States of America"),
//!     "Univ. U. S. A."
//! );
//! ```
//!
//! ## Loading the LTWA
//!
//! [`ltwa::load_dir`] picks the newest `ltwa_<date>` file in a directory and
//! caches the compiled tries next to it.
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod abbreviation;
pub mod abbreviator;
pub mod cache;
pub mod dictionary;
pub mod error;
pub mod ltwa;
pub mod stopwords;
pub mod trie;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use abbreviation::{Abbreviation, NOT_ABBREVIATED};
pub use abbreviator::{title_case, Abbreviator};
pub use cache::{FileStore, MemoryStore, SnapshotStore, TrieCache};
pub use dictionary::{
    clean_word, Dictionary, DictionaryBuilder, DictionaryEntry, DictionaryStats, LastWordTrie,
    PhraseTrie, WordTrie,
};
pub use error::{Iso4Error, Result};
pub use stopwords::remove_stopwords;
pub use trie::{Trie, TrieKey, TrieMatch};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
