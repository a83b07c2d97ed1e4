use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;

use crate::portal::Portal;
use crate::store::{self, MemoryStore};

/// Per-request view of a browser's persisted portal state.
///
/// Extracting it loads the store snapshot from the session; [`commit`]
/// writes any changes back.
///
/// [`commit`]: PortalSession::commit
pub struct PortalSession {
    session: Session,
    loaded: HashMap<String, String>,
    store: Arc<MemoryStore>,
}

#[async_trait]
impl<S> FromRequestParts<S> for PortalSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;

        let loaded = store::session::load(&session).await;
        let store = Arc::new(MemoryStore::from_entries(loaded.clone()));

        Ok(Self {
            session,
            loaded,
            store,
        })
    }
}

impl PortalSession {
    /// Build the portal for this request on top of the loaded snapshot.
    pub fn portal(&self) -> Portal {
        Portal::new(self.store.clone())
    }

    pub async fn commit(self) {
        store::session::persist(&self.session, &self.loaded, &self.store).await;
    }
}
