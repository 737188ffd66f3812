//! Persistence of compiled dictionaries.
//!
//! Building the tries from the full LTWA takes a while, so the result is
//! stored as a snapshot tagged with the LTWA version it was built from. A
//! snapshot older than the current list is ignored and rebuilt.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::Result;

/// Default snapshot file name inside a data directory
pub const SNAPSHOT_FILE: &str = "tries.json";

/// Raw byte storage for a snapshot
pub trait SnapshotStore {
    /// Read the stored bytes, `None` when nothing was stored yet
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored bytes
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

/// Snapshot stored in a file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store snapshots at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Store snapshots as `tries.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        FileStore::new(dir.join(SNAPSHOT_FILE))
    }

    /// Get the snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read(&self.path)?))
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// Snapshot kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.borrow().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        *self.bytes.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u64,
    dictionary: &'a Dictionary,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u64,
    dictionary: Dictionary,
}

/// Versioned cache of a compiled dictionary
pub struct TrieCache<S: SnapshotStore> {
    store: S,
}

impl<S: SnapshotStore> TrieCache<S> {
    /// Create a cache on top of `store`
    pub fn new(store: S) -> Self {
        TrieCache { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored dictionary if it is at least `current_version`.
    ///
    /// A snapshot that cannot be decoded counts as a miss.
    pub fn load(&self, current_version: u64) -> Result<Option<Dictionary>> {
        let Some(bytes) = self.store.read()? else {
            return Ok(None);
        };

        let snapshot: Snapshot = match serde_json::from_slice(&bytes) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("ignoring unreadable trie snapshot: {}", e);
                return Ok(None);
            }
        };

        if snapshot.version < current_version {
            log::info!(
                "trie snapshot {} is older than LTWA {}, rebuilding",
                snapshot.version,
                current_version
            );
            return Ok(None);
        }

        Ok(Some(snapshot.dictionary))
    }

    /// Store `dictionary` as built from LTWA `version`
    pub fn store_dictionary(&self, version: u64, dictionary: &Dictionary) -> Result<()> {
        let bytes = serde_json::to_vec(&SnapshotRef {
            version,
            dictionary,
        })?;
        self.store.write(&bytes)
    }

    /// Load the stored dictionary, or build and store a fresh one.
    ///
    /// A snapshot that cannot be written is logged and the fresh
    /// dictionary is returned anyway.
    pub fn load_or_build<F>(&self, current_version: u64, build: F) -> Result<Dictionary>
    where
        F: FnOnce() -> Result<Dictionary>,
    {
        if let Some(dictionary) = self.load(current_version)? {
            log::debug!("using cached tries for LTWA {}", current_version);
            return Ok(dictionary);
        }

        let dictionary = build()?;
        if let Err(e) = self.store_dictionary(current_version, &dictionary) {
            log::warn!("could not store trie snapshot: {}", e);
        }
        Ok(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abbreviation::Abbreviation;
    use crate::error::Iso4Error;

    fn sample() -> Dictionary {
        Dictionary::from_tsv("airplane\tairpl.\teng\nSouth Africa-\tS. Afr.\teng")
    }

    #[test]
    fn test_memory_roundtrip() {
        let cache = TrieCache::new(MemoryStore::new());
        assert!(cache.load(0).unwrap().is_none());

        cache.store_dictionary(20210702, &sample()).unwrap();
        let restored = cache.load(20210702).unwrap().unwrap();

        assert_eq!(
            restored.prefix.get("Airplane".chars()),
            Some(&Abbreviation::Literal("airpl.".to_string()))
        );
        let phrase = restored.last_word.get("africans".chars()).unwrap();
        assert_eq!(
            phrase.get(["south".to_string()]),
            Some(&Abbreviation::Literal("S. Afr.".to_string()))
        );
        assert_eq!(restored.stats, sample().stats);
    }

    #[test]
    fn test_stale_snapshot_is_a_miss() {
        let cache = TrieCache::new(MemoryStore::new());
        cache.store_dictionary(20170914, &sample()).unwrap();

        assert!(cache.load(20210702).unwrap().is_none());
        assert!(cache.load(20170914).unwrap().is_some());
        assert!(cache.load(0).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_snapshot_is_a_miss() {
        let store = MemoryStore::new();
        store.write(b"not json").unwrap();
        let cache = TrieCache::new(store);

        assert!(cache.load(0).unwrap().is_none());
    }

    #[test]
    fn test_load_or_build() {
        let cache = TrieCache::new(MemoryStore::new());
        let mut builds = 0;

        let first = cache
            .load_or_build(1, || {
                builds += 1;
                Ok(sample())
            })
            .unwrap();
        assert_eq!(first.stats.prefixes, 1);

        cache
            .load_or_build(1, || {
                builds += 1;
                Ok(sample())
            })
            .unwrap();
        assert_eq!(builds, 1);

        cache
            .load_or_build(2, || {
                builds += 1;
                Ok(sample())
            })
            .unwrap();
        assert_eq!(builds, 2);
    }

    #[test]
    fn test_build_error_propagates() {
        let cache = TrieCache::new(MemoryStore::new());
        let result =
            cache.load_or_build(1, || Err(Iso4Error::NoDictionary(PathBuf::from("."))));

        assert!(matches!(result, Err(Iso4Error::NoDictionary(_))));
        assert!(cache.store().read().unwrap().is_none());
    }

    /// Store whose writes always fail, like a read-only data directory
    struct ReadOnlyStore;

    impl SnapshotStore for ReadOnlyStore {
        fn read(&self) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn write(&self, _bytes: &[u8]) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_write_failure_keeps_built_dictionary() {
        let cache = TrieCache::new(ReadOnlyStore);
        assert!(cache.store_dictionary(1, &sample()).is_err());

        let dictionary = cache.load_or_build(1, || Ok(sample())).unwrap();
        assert_eq!(dictionary.stats, sample().stats);
        assert!(dictionary.prefix.get("airplane".chars()).is_some());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TrieCache::new(FileStore::in_dir(&dir.path().join("nested")));

        assert!(cache.load(0).unwrap().is_none());
        cache.store_dictionary(5, &sample()).unwrap();

        assert!(cache.store().path().is_file());
        assert!(cache.load(5).unwrap().is_some());
    }
}
