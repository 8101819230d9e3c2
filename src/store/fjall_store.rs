//! Durable store backed by fjall.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};
use once_cell::sync::OnceCell;

use crate::logging::{debug, info, trace};

use super::{KeyValueStore, StoreError};

/// Environment variable overriding the location of the standard store.
pub const STANDARD_PATH_ENV: &str = "KV_ADAPTER_PATH";

/// Location of the standard store when [`STANDARD_PATH_ENV`] is unset.
pub const DEFAULT_PATH: &str = ".kv-adapter";

/// Suite used when none is named.
pub const DEFAULT_SUITE: &str = "standard";

/// Keyspace name prefix for suites.
const SUITE_PREFIX: &str = "suite_";

/// Longest accepted suite name.
const MAX_SUITE_LEN: usize = 200;

static STANDARD: OnceCell<Arc<FjallStore>> = OnceCell::new();

/// A key-value store persisted to disk with fjall.
///
/// A database directory can hold several independent *suites*; each suite is
/// its own keyspace, so keys in one suite never collide with keys in
/// another. Every write is synced to disk before returning.
///
/// # Example
///
/// ```ignore
/// use kv_adapter::store::{FjallStore, KeyValueStore};
///
/// let store = FjallStore::open_suite("./data", "settings")?;
/// store.set("theme", b"\"dark\"")?;
/// ```
pub struct FjallStore {
    db: fjall::Database,
    records: Keyspace,
    path: PathBuf,
    suite: String,
}

impl FjallStore {
    /// Open (creating if needed) the default suite of the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_suite(path, DEFAULT_SUITE)
    }

    /// Open (creating if needed) a named suite of the database at `path`.
    pub fn open_suite(path: impl AsRef<Path>, suite: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), suite = suite, "opening fjall store");

        if !is_valid_suite_name(suite) {
            return Err(StoreError::InvalidSuite(suite.to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let keyspace_name = format!("{}{}", SUITE_PREFIX, suite);
        let records = db.keyspace(&keyspace_name, KeyspaceCreateOptions::default)?;

        info!(path = %path.display(), suite = suite, "fjall store opened");
        Ok(Self {
            db,
            records,
            path: path.to_path_buf(),
            suite: suite.to_string(),
        })
    }

    /// The process-wide standard store.
    ///
    /// Opened on first use at `$KV_ADAPTER_PATH` (or [`DEFAULT_PATH`]) with the
    /// default suite, then shared by every later caller.
    pub fn standard() -> Result<Arc<Self>, StoreError> {
        STANDARD
            .get_or_try_init(|| {
                let path = std::env::var_os(STANDARD_PATH_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));
                Self::open(path).map(Arc::new)
            })
            .cloned()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }
}

impl KeyValueStore for FjallStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        trace!(suite = %self.suite, key = key, "fjall get");
        Ok(self.records.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        trace!(suite = %self.suite, key = key, bytes = value.len(), "fjall set");
        self.records.insert(key, value)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        trace!(suite = %self.suite, key = key, "fjall remove");
        self.records.remove(key)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn all_keys(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut keys = BTreeSet::new();

        for kv in self.records.iter() {
            let key_bytes = kv.key()?;
            keys.insert(String::from_utf8_lossy(&key_bytes).into_owned());
        }

        Ok(keys)
    }
}

fn is_valid_suite_name(suite: &str) -> bool {
    !suite.is_empty()
        && suite.len() <= MAX_SUITE_LEN
        && suite
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_name_validation() {
        assert!(is_valid_suite_name("standard"));
        assert!(is_valid_suite_name("test-suite_2"));
        assert!(!is_valid_suite_name(""));
        assert!(!is_valid_suite_name("has space"));
        assert!(!is_valid_suite_name("dotted.name"));
        assert!(!is_valid_suite_name(&"x".repeat(MAX_SUITE_LEN + 1)));
    }

    #[test]
    fn test_invalid_suite_rejected() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let result = FjallStore::open_suite(dir.path(), "bad/suite");
        assert!(matches!(result, Err(StoreError::InvalidSuite(_))));
        Ok(())
    }

    #[test]
    fn test_persists_across_reopen() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;

        {
            let store = FjallStore::open(dir.path())?;
            store.set("greeting", b"hello")?;
            store.set("doomed", b"bye")?;
            store.remove("doomed")?;
        }

        let store = FjallStore::open(dir.path())?;
        assert_eq!(store.get("greeting")?.as_deref(), Some(&b"hello"[..]));
        assert!(store.get("doomed")?.is_none());
        assert_eq!(store.suite(), DEFAULT_SUITE);
        Ok(())
    }

    #[test]
    fn test_suites_are_isolated() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let first = FjallStore::open_suite(dir.path(), "first")?;
        first.set("shared-key", b"1")?;
        drop(first);

        let second = FjallStore::open_suite(dir.path(), "second")?;
        assert!(second.get("shared-key")?.is_none());
        assert!(second.all_keys()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_keys_and_remove_absent() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let store = FjallStore::open(dir.path())?;
        store.set("b", b"2")?;
        store.set("a", b"1")?;
        store.remove("never-written")?;

        let keys: Vec<String> = store.all_keys()?.into_iter().collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        Ok(())
    }
}
