//! Integration tests for LTWA-driven title abbreviation
//!
//! These run the public API end to end: LTWA rows in, abbreviated titles out.

use std::fs;

use iso4_rs::{
    ltwa, remove_stopwords, Abbreviation, Abbreviator, Dictionary, DictionaryBuilder, FileStore,
    TrieCache,
};

const LTWA: &str = "WORD\tABBREVIATIONS\tLANGUAGES
graph-\tgr.\tmul
Ciudad-\tciudad.\tspa
labor\tn.a.\teng
Labor (work)\tlab.\teng
Universit-\tuniv.\tmul
Fairfield\tFairfld.\teng
afield\tn.a.\teng
alcoholi-\talcohol.\teng
Ciudad real\tCiudad R.\tspa
United States of America\tU. S. A.\teng
South Africa-\tS. Afr.\teng
-plane\tpl.\teng
-ship\tsh.\teng
-field\tf.\teng
";

fn abbreviator() -> Abbreviator {
    Abbreviator::new(Dictionary::from_tsv(LTWA))
}

// =============================================================================
// Word abbreviation
// =============================================================================

#[test]
fn test_prefix_precedes_suffix() {
    let abbr = abbreviator();
    assert_eq!(abbr.abbreviate_word("Fairfield"), "Fairfld.");
    assert_eq!(abbr.abbreviate_word("Smallfield"), "Smallf.");
}

#[test]
fn test_not_abbreviated_is_not_absent() {
    let dict = Dictionary::from_tsv(LTWA);
    assert_eq!(
        dict.prefix.get("afield".chars()),
        Some(&Abbreviation::DoNotAbbreviate)
    );
    assert_eq!(dict.prefix.get("abroad".chars()), None);

    // A registered "n.a." stops the "-field" ending from applying
    assert_eq!(abbreviator().abbreviate_word("afield"), "afield");
}

#[test]
fn test_stem_entries() {
    let abbr = abbreviator();
    assert_eq!(abbr.abbreviate_word("Graphics"), "gr.");
    assert_eq!(abbr.abbreviate_word("alcoholism"), "alcohol.");
    assert_eq!(abbr.abbreviate_word("Universität"), "univ.");
}

#[test]
fn test_compound_words() {
    let mut builder = DictionaryBuilder::new();
    builder.add("Haute-Corse", "Ht.-Corse");
    builder.add("airplane", "airpl.");
    builder.add("field", "n.a.");
    builder.add("-ship", "sh.");
    let abbr = Abbreviator::new(builder.build());

    assert_eq!(
        abbr.abbreviate_word("airplane-airship-field-generator"),
        "airpl.-airsh.-field-generator"
    );
    assert_eq!(abbr.abbreviate_word("Haute-Corse"), "Ht.-Corse");
}

// =============================================================================
// Sequence abbreviation
// =============================================================================

#[test]
fn test_reference_sequence() {
    let words = [
        "alcoholic",
        "ship",
        "airplane",
        "united",
        "states",
        "of",
        "america",
        "south",
        "africanism",
        "afield",
        "Fairfield",
    ];

    assert_eq!(
        abbreviator().abbreviate(&words),
        vec![
            "alcohol.",
            "ship",
            "airpl.",
            "U. S. A.",
            "S. Afr.",
            "afield",
            "Fairfld.",
        ]
    );
}

#[test]
fn test_phrase_consumes_matched_words_only() {
    let words = ["labor", "south", "africa"];
    assert_eq!(abbreviator().abbreviate(&words), vec!["lab.", "S. Afr."]);
}

#[test]
fn test_owned_input() {
    let words: Vec<String> = "Ciudad real".split(' ').map(String::from).collect();
    assert_eq!(abbreviator().abbreviate(&words), vec!["Ciudad R."]);
}

#[test]
fn test_long_title_does_not_recurse() {
    let words = vec!["airship"; 100_000];
    let out = abbreviator().abbreviate(&words);
    assert_eq!(out.len(), 100_000);
    assert!(out.iter().all(|w| w == "airsh."));
}

// =============================================================================
// Titles
// =============================================================================

#[test]
fn test_title_pipeline() {
    let abbr = abbreviator();
    assert_eq!(
        abbr.abbreviate_title("Labor in the United States of America"),
        "Lab. U. S. A."
    );
    assert_eq!(abbr.abbreviate_title("Fairfield"), "Fairfield");
    assert_eq!(abbr.abbreviate_title(""), "");
}

#[test]
fn test_stopword_pass_keeps_first_word() {
    assert_eq!(
        remove_stopwords(&["of", "the", "airsh.", "and", "gr."]),
        vec!["of", "airsh.", "gr."]
    );
}

// =============================================================================
// LTWA files and cache
// =============================================================================

fn utf16le(s: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

#[test]
fn test_load_dir_picks_newest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ltwa_20170914.txt"), utf16le("airplane\taeropl.\teng\n")).unwrap();
    fs::write(dir.path().join("ltwa_20210702.txt"), utf16le(LTWA)).unwrap();

    let abbr = Abbreviator::new(ltwa::load_dir(dir.path(), false).unwrap());
    assert_eq!(abbr.abbreviate_word("airplane"), "airpl.");
}

#[test]
fn test_snapshot_matches_fresh_build() {
    let dir = tempfile::tempdir().unwrap();
    let cache = TrieCache::new(FileStore::in_dir(dir.path()));

    let fresh = Dictionary::from_tsv(LTWA);
    cache.store_dictionary(20210702, &fresh).unwrap();
    let restored = cache.load(20210702).unwrap().unwrap();

    let title = "alcoholic ship airplane united states of america south africanism afield Fairfield";
    assert_eq!(
        Abbreviator::new(restored).abbreviate_title(title),
        Abbreviator::new(fresh).abbreviate_title(title)
    );
}
