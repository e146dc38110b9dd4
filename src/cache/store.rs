//! Two-tier cache store for API payloads
//!
//! Provides a `CacheStore` that keeps JSON payloads in memory and mirrors every
//! write to a JSON file on disk, so cached responses survive between runs.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Delimiter that replaces path separators in cache keys
const KEY_DELIMITER: &str = ".";

/// Characters treated as path separators in raw keys
const SEPARATORS: &[char] = &['/', '\\'];

/// Errors that can occur when writing to or clearing the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("Cache I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be serialized
    #[error("Failed to serialize cache payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory map of JSON payloads backed by one file per key
///
/// Reads check memory first, then the file `<cache_dir>/<normalized key>.json`.
/// A file hit is promoted into memory. Writes update both tiers synchronously.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// In-memory tier, keyed by normalized key
    entries: HashMap<String, Value>,
}

impl CacheStore {
    /// Creates a new CacheStore persisting to `cache_dir`
    ///
    /// The directory is not touched until the first write.
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// Directory holding the on-disk tier
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Normalizes a raw key (usually an endpoint path) into a cache key
    ///
    /// Lower-cases, drops whitespace, trims leading/trailing separators and
    /// replaces the remaining `/` and `\` with [`KEY_DELIMITER`]. Applying it
    /// twice yields the same result as applying it once.
    pub fn normalize(key: &str) -> String {
        let compact: String = key
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        compact
            .trim_matches(SEPARATORS)
            .split(SEPARATORS)
            .collect::<Vec<_>>()
            .join(KEY_DELIMITER)
    }

    /// Returns the path to the cache file for an already-normalized key
    fn cache_path(&self, cache_key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", cache_key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })
    }

    /// Stores a payload in memory and overwrites its file on disk
    ///
    /// # Returns
    /// * `Ok(&Value)` - the stored payload
    /// * `Err(CacheError)` if the directory or file cannot be written
    pub fn put(&mut self, key: &str, payload: Value) -> Result<&Value, CacheError> {
        let cache_key = Self::normalize(key);
        self.ensure_dir()?;

        let json = serde_json::to_string(&payload)?;
        let path = self.cache_path(&cache_key);
        fs::write(&path, json).map_err(|source| CacheError::Io { path, source })?;

        debug!(key = %cache_key, "wrote cache entry");
        self.entries.insert(cache_key.clone(), payload);
        Ok(&self.entries[&cache_key])
    }

    /// Looks a payload up, memory first and then disk
    ///
    /// Returns `None` when neither tier has the key. An empty list or object is
    /// a hit like any other payload. Unreadable or corrupt files are logged and
    /// reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        let cache_key = Self::normalize(key);

        if self.entries.contains_key(&cache_key) {
            debug!(key = %cache_key, "read from memory");
            return self.entries.get(&cache_key);
        }

        let payload = self.read_file(&cache_key)?;
        debug!(key = %cache_key, "read from file");
        self.entries.insert(cache_key.clone(), payload);
        self.entries.get(&cache_key)
    }

    /// Reads and parses the file behind a key, if there is one
    fn read_file(&self, cache_key: &str) -> Option<Value> {
        let path = self.cache_path(cache_key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache file");
                None
            }
        }
    }

    /// Drops every in-memory entry and removes the cache directory
    ///
    /// A missing directory is not an error.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.entries.clear();

        match fs::remove_dir_all(&self.cache_dir) {
            Ok(()) => {
                debug!(dir = %self.cache_dir.display(), "cleared cache");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io {
                path: self.cache_dir.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_cache() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheStore::with_dir(temp_dir.path().join("cache"));
        (cache, temp_dir)
    }

    #[test]
    fn test_normalize_replaces_separators_and_case() {
        assert_eq!(CacheStore::normalize("/budgets"), "budgets");
        assert_eq!(
            CacheStore::normalize("/Budgets/ABC-123/Accounts"),
            "budgets.abc-123.accounts"
        );
        assert_eq!(CacheStore::normalize("  /budgets/x/payees/ "), "budgets.x.payees");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for key in [
            "/budgets",
            "/budgets/1234/categories/5678/transactions",
            " Mixed\\Case / Path ",
            "",
            "already.normalized",
        ] {
            let once = CacheStore::normalize(key);
            assert_eq!(CacheStore::normalize(&once), once, "key: {:?}", key);
        }
    }

    #[test]
    fn test_normalize_keeps_distinct_paths_distinct() {
        assert_ne!(
            CacheStore::normalize("/budgets/a/payees"),
            CacheStore::normalize("/budgets/a/payees/b")
        );
        assert_ne!(
            CacheStore::normalize("/budgets/a/transactions"),
            CacheStore::normalize("/budgets/b/transactions")
        );
    }

    #[test]
    fn test_put_creates_directory_and_file() {
        let (mut cache, temp_dir) = create_test_cache();
        assert_eq!(cache.cache_dir(), temp_dir.path().join("cache"));
        assert!(!cache.cache_dir().exists(), "Directory is created lazily");

        cache
            .put("/budgets", json!([{"id": "b1", "name": "Personal"}]))
            .expect("Put should succeed");

        let expected_path = cache.cache_dir().join("budgets.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"Personal\""));
    }

    #[test]
    fn test_put_returns_stored_payload() {
        let (mut cache, _temp_dir) = create_test_cache();
        let payload = json!({"id": "p1"});

        let stored = cache.put("/budgets/b/payees/p1", payload.clone()).unwrap();

        assert_eq!(stored, &payload);
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (mut cache, _temp_dir) = create_test_cache();

        assert!(cache.get("/nonexistent").is_none());
    }

    #[test]
    fn test_round_trip_preserves_empty_payloads() {
        let (mut cache, _temp_dir) = create_test_cache();

        cache.put("/empty-list", json!([])).unwrap();
        cache.put("/empty-map", json!({})).unwrap();

        assert_eq!(cache.get("/empty-list"), Some(&json!([])));
        assert_eq!(cache.get("/empty-map"), Some(&json!({})));
    }

    #[test]
    fn test_get_falls_back_to_disk() {
        let (mut cache, temp_dir) = create_test_cache();
        let payload = json!([{"id": "a1", "name": "Checking"}]);
        cache.put("/budgets/b/accounts", payload.clone()).unwrap();

        // A fresh store over the same directory has an empty memory tier
        let mut reopened = CacheStore::with_dir(temp_dir.path().join("cache"));

        assert_eq!(reopened.get("/budgets/b/accounts"), Some(&payload));
        assert!(reopened.entries.contains_key("budgets.b.accounts"));
    }

    #[test]
    fn test_get_ignores_corrupt_file() {
        let (mut cache, temp_dir) = create_test_cache();
        let dir = temp_dir.path().join("cache");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("budgets.json"), "{not json").unwrap();

        assert!(cache.get("/budgets").is_none());
    }

    #[test]
    fn test_overwrite_existing_entry() {
        let (mut cache, temp_dir) = create_test_cache();

        cache.put("/payees", json!(["first"])).unwrap();
        cache.put("/payees", json!(["second"])).unwrap();

        assert_eq!(cache.get("/payees"), Some(&json!(["second"])));
        let mut reopened = CacheStore::with_dir(temp_dir.path().join("cache"));
        assert_eq!(reopened.get("/payees"), Some(&json!(["second"])));
    }

    #[test]
    fn test_clear_removes_all_entries_and_directory() {
        let (mut cache, temp_dir) = create_test_cache();
        let keys = ["/budgets", "/budgets/b/accounts", "/budgets/b/payees"];
        for key in keys {
            cache.put(key, json!([1, 2, 3])).unwrap();
        }

        cache.clear().expect("Clear should succeed");

        for key in keys {
            assert!(cache.get(key).is_none(), "{} should be gone", key);
        }
        assert!(!temp_dir.path().join("cache").exists());
    }

    #[test]
    fn test_clear_without_directory_is_noop() {
        let (mut cache, _temp_dir) = create_test_cache();

        assert!(cache.clear().is_ok());
        assert!(cache.clear().is_ok());
    }
}
