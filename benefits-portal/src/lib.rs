pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod portal;
pub mod services;
pub mod startup;
pub mod store;

use config::SessionSettings;
use middleware::session_lock::SessionLocks;
use navigation::PageRegistry;

/// Shared application state. Portal state itself lives in each browser
/// session, so this only carries process-wide pieces.
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: PageRegistry,
    pub session: SessionSettings,
    pub session_locks: SessionLocks,
}

impl AppState {
    pub fn new(session: SessionSettings) -> Self {
        Self {
            registry: PageRegistry::new(),
            session,
            session_locks: SessionLocks::default(),
        }
    }
}
