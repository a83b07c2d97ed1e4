//! String-keyed persistent state shared by the navigation controller and the
//! profile sub-page channel.
//!
//! Every access from portal code goes through [`read`], [`write`] and
//! [`erase`]: a failing store never fails the caller, it only loses the
//! persisted side of the operation.

pub mod session;

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::services::metrics::record_storage_failure;

/// Keys owned by the portal inside the shared store.
pub mod keys {
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const CURRENT_PAGE: &str = "currentPage";
    pub const PROFILE_SUB_PAGE: &str = "myProfileSubPage";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Synchronous key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-process store; also the snapshot type used for browser sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read a key, treating any storage failure as an absent value.
pub fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage read failed, treating value as absent");
            record_storage_failure("get");
            None
        }
    }
}

/// Write a key. Returns whether the value was persisted.
pub fn write(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage write failed, value not persisted");
            record_storage_failure("set");
            false
        }
    }
}

/// Remove a key. Returns whether the removal reached the store.
pub fn erase(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage remove failed");
            record_storage_failure("remove");
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FlakyStore;
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.snapshot().is_empty());

        store.set(keys::CURRENT_PAGE, "claims").unwrap();
        assert_eq!(store.get(keys::CURRENT_PAGE).unwrap().as_deref(), Some("claims"));

        store.remove(keys::CURRENT_PAGE).unwrap();
        assert_eq!(store.get(keys::CURRENT_PAGE).unwrap(), None);
        // removing an absent key is fine
        store.remove(keys::CURRENT_PAGE).unwrap();
    }

    #[test]
    fn test_snapshot_reflects_entries() {
        let store = MemoryStore::from_entries([(keys::IS_AUTHENTICATED, "true")]);
        store.set(keys::CURRENT_PAGE, "hsa").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[keys::CURRENT_PAGE], "hsa");
    }

    #[test]
    fn test_guarded_helpers_swallow_failures() {
        let store = FlakyStore::unavailable();

        assert_eq!(read(&store, keys::CURRENT_PAGE), None);
        assert!(!write(&store, keys::CURRENT_PAGE, "claims"));
        assert!(!erase(&store, keys::CURRENT_PAGE));
    }

    #[test]
    fn test_guarded_helpers_pass_through() {
        let store = MemoryStore::new();

        assert!(write(&store, keys::PROFILE_SUB_PAGE, "banking"));
        assert_eq!(
            read(&store, keys::PROFILE_SUB_PAGE).as_deref(),
            Some("banking")
        );
        assert!(erase(&store, keys::PROFILE_SUB_PAGE));
        assert_eq!(read(&store, keys::PROFILE_SUB_PAGE), None);
    }
}
