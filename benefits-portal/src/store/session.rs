//! Browser-scoped store backed by the tower-sessions session.
//!
//! The whole key-value map lives under a single session key. It is loaded
//! into a [`MemoryStore`] before the portal runs and written back afterwards,
//! so the navigation core only ever sees the synchronous store interface.

use std::collections::HashMap;
use tower_sessions::Session;

use super::MemoryStore;
use crate::services::metrics::record_storage_failure;

pub const SESSION_STORE_KEY: &str = "portal.store";

/// Load the persisted map; a broken session yields an empty store.
pub async fn load(session: &Session) -> HashMap<String, String> {
    match session
        .get::<HashMap<String, String>>(SESSION_STORE_KEY)
        .await
    {
        Ok(Some(entries)) => entries,
        Ok(None) => HashMap::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load portal store from session");
            record_storage_failure("load");
            HashMap::new()
        }
    }
}

/// Write the store back when it differs from what was loaded.
///
/// Returns whether the session was updated.
pub async fn persist(
    session: &Session,
    loaded: &HashMap<String, String>,
    store: &MemoryStore,
) -> bool {
    let entries = store.snapshot();
    if &entries == loaded {
        return false;
    }

    match session.insert(SESSION_STORE_KEY, entries).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to persist portal store to session");
            record_storage_failure("persist");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{keys, KeyValueStore};
    use std::sync::Arc;

    fn session() -> Session {
        Session::new(None, Arc::new(tower_sessions::MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_empty_session_loads_empty_store() {
        let session = session();
        assert!(load(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_persist_then_load() {
        let session = session();
        let loaded = load(&session).await;
        let store = MemoryStore::from_entries(loaded.clone());
        store.set(keys::IS_AUTHENTICATED, "true").unwrap();
        store.set(keys::CURRENT_PAGE, "claims").unwrap();

        assert!(persist(&session, &loaded, &store).await);

        let reloaded = load(&session).await;
        assert_eq!(reloaded[keys::CURRENT_PAGE], "claims");
        assert_eq!(reloaded[keys::IS_AUTHENTICATED], "true");
    }

    #[tokio::test]
    async fn test_unchanged_store_is_not_written() {
        let session = session();
        let loaded = load(&session).await;
        let store = MemoryStore::from_entries(loaded.clone());

        assert!(!persist(&session, &loaded, &store).await);
        let stored: Option<HashMap<String, String>> =
            session.get(SESSION_STORE_KEY).await.unwrap();
        assert!(stored.is_none());
    }
}
