//! Error types for dictionary loading, caching and downloading.
//!
//! The abbreviation itself never fails: every lookup either matches a rule or
//! passes the word through. Errors only come from the collaborators around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing a dictionary
#[derive(Debug, Error)]
pub enum Iso4Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A trie snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The dictionary file is neither UTF-8 nor UTF-16LE
    #[error("Decode error: {0}")]
    Decode(String),

    /// No LTWA file was found in the given directory
    #[error("No LTWA file found in {}", .0.display())]
    NoDictionary(PathBuf),

    /// Network error during download
    #[error("Network error: {0}")]
    Network(String),

    /// Error extracting a zip archive
    #[error("Zip error: {0}")]
    Zip(String),

    /// A downloaded source does not look like an LTWA file
    #[error("Invalid LTWA source: {0}")]
    InvalidSource(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Iso4Error>;
