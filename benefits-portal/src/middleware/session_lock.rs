use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Name of the session cookie set by the session layer.
pub const SESSION_COOKIE: &str = "portal_session";

/// One async lock per browser session.
///
/// Each portal request reads the whole store snapshot and writes it back, so
/// two overlapping requests from one browser would lose each other's updates.
/// Holding the session's lock across the session layer makes them run one
/// after the other.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub async fn acquire(&self, session_key: &str) -> SessionLease {
        let lock = Arc::clone(&self.locks.entry(session_key.to_string()).or_default());
        let guard = lock.lock_owned().await;

        SessionLease {
            key: session_key.to_string(),
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }
}

/// Exclusive access to one session until dropped.
pub struct SessionLease {
    key: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.guard.take();
        // Forget the lock once nobody holds or waits for it.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Serialize requests that carry the same session cookie. Requests without
/// a cookie have no persisted state yet and pass straight through.
pub async fn serialize_session_requests(
    State(locks): State<SessionLocks>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let _lease = match jar.get(SESSION_COOKIE) {
        Some(cookie) => Some(locks.acquire(cookie.value()).await),
        None => None,
    };

    next.run(req).await
}
