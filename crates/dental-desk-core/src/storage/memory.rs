//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StorageError, StorageResult};

/// Process-local key-value store, optionally capped at a byte quota.
///
/// The quota counts key and value bytes across all entries, the way a
/// browser's local storage budget does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota` bytes are used.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> StorageResult<usize> {
        let entries = self.entries.lock()?;
        Ok(entries.iter().map(|(k, v)| k.len() + v.len()).sum())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let mut entries = self.entries.lock()?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock()?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStorage::new();
        store.set("a", b"hello").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"hello".to_vec()));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);

        // Removing again is fine
        store.remove("a").unwrap();
    }

    #[test]
    fn test_quota_rejects_oversize_write() {
        let store = MemoryStorage::with_quota(16);
        store.set("k", b"0123456789").unwrap();

        let err = store.set("other", b"0123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 16, .. }));

        // Previous value untouched
        assert_eq!(store.get("k").unwrap(), Some(b"0123456789".to_vec()));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let store = MemoryStorage::with_quota(12);
        store.set("k", b"0123456789").unwrap();
        // Overwriting the same key only needs the new size
        store.set("k", b"abcdefghij").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 11);
    }
}
