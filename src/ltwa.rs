//! LTWA file discovery, decoding and downloading.
//!
//! LTWA releases are named after their publication date, e.g.
//! `ltwa_20210702.csv`. The newest file in a directory wins, and its date
//! doubles as the dictionary version used to invalidate cached tries.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cache::{FileStore, TrieCache};
use crate::dictionary::Dictionary;
use crate::error::{Iso4Error, Result};

static LTWA_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^ltwa_(\d+)").expect("valid LTWA file pattern"));

/// An LTWA file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LtwaFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Date stamp from the file name (`YYYYMMDD`)
    pub version: u64,
}

/// Get the version encoded in an LTWA file name
pub fn parse_version(file_name: &str) -> Option<u64> {
    LTWA_NAME
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Find the newest LTWA file in `dir`
pub fn find_latest(dir: &Path) -> Result<Option<LtwaFile>> {
    let mut latest: Option<LtwaFile> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(version) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_version)
        else {
            continue;
        };

        if latest.as_ref().map_or(true, |l| version > l.version) {
            latest = Some(LtwaFile { path, version });
        }
    }

    if let Some(ref file) = latest {
        log::debug!("using LTWA file {}", file.path.display());
    }
    Ok(latest)
}

/// Get the version of the newest LTWA file in `dir`, 0 when there is none
pub fn version(dir: &Path) -> Result<u64> {
    Ok(find_latest(dir)?.map_or(0, |f| f.version))
}

/// Decode LTWA file content.
///
/// The ISSN distributes the list as UTF-16LE; UTF-8 is accepted too.
pub fn decode(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16le(rest);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return utf8(rest);
    }
    // ASCII text in UTF-16LE has a NUL in every odd byte
    if bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes[1] == 0 && bytes[0] != 0 {
        return decode_utf16le(bytes);
    }
    utf8(bytes)
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Iso4Error::Decode(e.to_string()))
}

fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Iso4Error::Decode("odd byte count in UTF-16 data".into()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Iso4Error::Decode(e.to_string()))
}

/// Read and decode an LTWA file
pub fn read(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Build a dictionary from a single LTWA file
pub fn load_file(path: &Path) -> Result<Dictionary> {
    log::info!("building tries from {}", path.display());
    Ok(Dictionary::from_tsv(&read(path)?))
}

/// Load the dictionary for the newest LTWA file in `dir`.
///
/// With `use_cache`, compiled tries are kept in `dir/tries.json` and reused
/// until a newer LTWA file shows up.
pub fn load_dir(dir: &Path, use_cache: bool) -> Result<Dictionary> {
    let latest = find_latest(dir)?.ok_or_else(|| Iso4Error::NoDictionary(dir.to_path_buf()))?;

    if !use_cache {
        return load_file(&latest.path);
    }

    TrieCache::new(FileStore::in_dir(dir)).load_or_build(latest.version, || load_file(&latest.path))
}

/// Get the default directory for downloaded LTWA files
/// Returns <data dir>/iso4-rs/
#[cfg(feature = "download")]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("iso4-rs")
}

/// Download an LTWA file from `url` into `dir`.
///
/// Zip archives are searched for `ltwa_*` members; any other response is
/// stored under the last segment of the URL, which must itself be an LTWA
/// file name. Returns the newest LTWA file in `dir` afterwards.
#[cfg(feature = "download")]
pub fn download(url: &str, dir: &Path) -> Result<LtwaFile> {
    use std::io::{self, Cursor};

    fs::create_dir_all(dir)?;

    log::info!("downloading LTWA from {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent("iso4-rs")
        .timeout(std::time::Duration::from_secs(120))
        .build()
        .map_err(|e| Iso4Error::Network(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Iso4Error::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Iso4Error::Network(format!(
            "Failed to download LTWA: HTTP {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Iso4Error::Network(e.to_string()))?;

    if bytes.starts_with(b"PK\x03\x04") {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| Iso4Error::Zip(e.to_string()))?;

        let mut extracted = 0;
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Iso4Error::Zip(e.to_string()))?;

            let Some(name) = file
                .enclosed_name()
                .and_then(|p| p.file_name().map(PathBuf::from))
            else {
                continue;
            };
            if file.is_dir() || parse_version(&name.to_string_lossy()).is_none() {
                continue;
            }

            let mut outfile = fs::File::create(dir.join(&name))?;
            io::copy(&mut file, &mut outfile)?;
            extracted += 1;
        }

        if extracted == 0 {
            return Err(Iso4Error::InvalidSource(format!(
                "no ltwa_* file in archive {}",
                url
            )));
        }
    } else {
        let name = url
            .rsplit('/')
            .next()
            .and_then(|s| s.split(['?', '#']).next())
            .unwrap_or_default();
        if parse_version(name).is_none() {
            return Err(Iso4Error::InvalidSource(format!(
                "{} is not an LTWA file name",
                name
            )));
        }
        fs::write(dir.join(name), &bytes)?;
    }

    log::info!("download completed");

    find_latest(dir)?.ok_or_else(|| Iso4Error::NoDictionary(dir.to_path_buf()))
}
