//! Python bindings for iso4-rs using PyO3
//!
//! This module provides a Python-compatible wrapper around the abbreviator.

use std::path::Path;
use std::sync::Arc;

use pyo3::exceptions::{PyIOError, PyRuntimeError};
use pyo3::prelude::*;

use crate::abbreviator::Abbreviator as RustAbbreviator;
use crate::dictionary::Dictionary;
use crate::error::Iso4Error;
use crate::{ltwa, stopwords};

fn to_py_err(e: Iso4Error) -> PyErr {
    match e {
        Iso4Error::Io(_) | Iso4Error::NoDictionary(_) => PyIOError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// ISO 4 title abbreviator
///
/// Example:
///     >>> from iso4_rs import Abbreviator
///     >>> abbr = Abbreviator.from_dir(".")
///     >>> abbr.abbreviate_title("Journal of the American Chemical Society")
///     'J. Am. Chem. Soc.'
#[pyclass(name = "Abbreviator")]
pub struct PyAbbreviator {
    /// Shared dictionary reference
    dictionary: Arc<Dictionary>,
}

impl PyAbbreviator {
    fn inner(&self) -> RustAbbreviator {
        RustAbbreviator::with_arc(Arc::clone(&self.dictionary))
    }
}

#[pymethods]
impl PyAbbreviator {
    /// Build from LTWA rows (tab-separated WORD, ABBREVIATION, LANGUAGES)
    #[staticmethod]
    fn from_tsv(tsv_content: &str) -> Self {
        PyAbbreviator {
            dictionary: Arc::new(Dictionary::from_tsv(tsv_content)),
        }
    }

    /// Build from a single LTWA file (UTF-8 or UTF-16LE)
    #[staticmethod]
    fn from_file(path: &str) -> PyResult<Self> {
        let dictionary = ltwa::load_file(Path::new(path)).map_err(to_py_err)?;
        Ok(PyAbbreviator {
            dictionary: Arc::new(dictionary),
        })
    }

    /// Load the newest ltwa_<date> file in a directory
    ///
    /// Args:
    ///     path: Directory holding the LTWA files
    ///     use_cache: Reuse (and write) the compiled tries in tries.json
    #[staticmethod]
    #[pyo3(signature = (path, use_cache=true))]
    fn from_dir(path: &str, use_cache: bool) -> PyResult<Self> {
        let dictionary = ltwa::load_dir(Path::new(path), use_cache).map_err(to_py_err)?;
        Ok(PyAbbreviator {
            dictionary: Arc::new(dictionary),
        })
    }

    /// Abbreviate a list of words
    fn abbreviate(&self, words: Vec<String>) -> Vec<String> {
        self.inner().abbreviate(&words)
    }

    /// Abbreviate a single word
    fn abbreviate_word(&self, word: &str) -> String {
        self.inner().abbreviate_word(word)
    }

    /// Abbreviate a full title, dropping stopwords
    fn abbreviate_title(&self, title: &str) -> String {
        self.inner().abbreviate_title(title)
    }

    fn __repr__(&self) -> String {
        let stats = self.dictionary.stats;
        format!(
            "Abbreviator(prefixes={}, suffixes={}, phrases={})",
            stats.prefixes, stats.suffixes, stats.phrases
        )
    }
}

/// Remove articles, conjunctions and prepositions (the first word is kept)
#[pyfunction]
fn remove_stopwords(words: Vec<String>) -> Vec<String> {
    stopwords::remove_stopwords(&words)
}

/// Download an LTWA file into a directory and return its path
#[pyfunction]
#[pyo3(signature = (url, path=None))]
fn download_ltwa(url: &str, path: Option<&str>) -> PyResult<String> {
    let dir = path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ltwa::default_data_dir);
    let file = ltwa::download(url, &dir).map_err(to_py_err)?;
    Ok(file.path.to_string_lossy().to_string())
}

#[pymodule]
fn iso4_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAbbreviator>()?;
    m.add_function(wrap_pyfunction!(remove_stopwords, m)?)?;
    m.add_function(wrap_pyfunction!(download_ltwa, m)?)?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
