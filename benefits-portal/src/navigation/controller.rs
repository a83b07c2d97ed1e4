//! Session and navigation state for one portal instance.
//!
//! The controller is the only writer of the authentication flag and the
//! current page. Every transition completes in memory even when the store
//! rejects the write; persistence is best effort.

use super::page::PageId;
use crate::services::metrics::record_navigation;
use crate::store::{self, keys, SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_page: PageId,
}

/// What the portal shows for a given session/navigation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Page(PageId),
}

pub struct NavigationController {
    store: SharedStore,
    session: SessionState,
    navigation: NavigationState,
}

impl NavigationController {
    /// Restore state from the store. Missing, unreadable or unknown values
    /// fall back to a logged-out session on the home page.
    pub fn initialize(store: SharedStore) -> Self {
        let authenticated =
            store::read(store.as_ref(), keys::IS_AUTHENTICATED).as_deref() == Some("true");
        let current_page = restore_page(&store);

        tracing::debug!(
            authenticated,
            current_page = %current_page,
            "Navigation state restored"
        );

        Self {
            store,
            session: SessionState { authenticated },
            navigation: NavigationState { current_page },
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn current_page(&self) -> PageId {
        self.navigation.current_page
    }

    /// The page is only reachable once the session is authenticated.
    pub fn screen(&self) -> Screen {
        if self.session.authenticated {
            Screen::Page(self.navigation.current_page)
        } else {
            Screen::Login
        }
    }

    /// Mark the session authenticated and land on the last persisted page.
    pub fn login(&mut self) -> PageId {
        self.session.authenticated = true;
        store::write(self.store.as_ref(), keys::IS_AUTHENTICATED, "true");

        let page = restore_page(&self.store);
        self.navigation.current_page = page;
        store::write(self.store.as_ref(), keys::CURRENT_PAGE, page.as_str());

        tracing::info!(page = %page, "User logged in");
        page
    }

    /// Drop the session flag. The current page is kept so that a later login
    /// returns to it.
    pub fn logout(&mut self) {
        self.session.authenticated = false;
        store::erase(self.store.as_ref(), keys::IS_AUTHENTICATED);

        tracing::info!(page = %self.navigation.current_page, "User logged out");
    }

    /// Switch to `requested`, clamping unknown identifiers to the home page.
    pub fn navigate(&mut self, requested: &str) -> PageId {
        let page = PageId::parse(requested).unwrap_or_else(|| {
            tracing::debug!(requested, "Unknown navigation target, using default page");
            PageId::default()
        });
        self.navigate_to(page)
    }

    pub fn navigate_to(&mut self, page: PageId) -> PageId {
        self.navigation.current_page = page;
        store::write(self.store.as_ref(), keys::CURRENT_PAGE, page.as_str());
        record_navigation(page);

        tracing::debug!(page = %page, "Navigated");
        page
    }

    pub fn navigate_home(&mut self) -> PageId {
        self.navigate_to(PageId::Home)
    }

    pub fn navigate_to_profile(&mut self) -> PageId {
        self.navigate_to(PageId::Profile)
    }

    pub fn navigate_to_admin(&mut self) -> PageId {
        self.navigate_to(PageId::Admin)
    }

    pub fn navigate_to_message_center(&mut self) -> PageId {
        self.navigate_to(PageId::MessageCenter)
    }

    /// "Back" from a standalone page such as the message center.
    pub fn navigate_back(&mut self) -> PageId {
        self.navigate_home()
    }
}

fn restore_page(store: &SharedStore) -> PageId {
    store::read(store.as_ref(), keys::CURRENT_PAGE)
        .map(|raw| PageId::resolve(&raw))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::FlakyStore;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn stored(store: &MemoryStore, key: &str) -> Option<String> {
        store.get(key).unwrap()
    }

    #[test]
    fn test_initialize_with_empty_store() {
        let store = Arc::new(MemoryStore::new());
        let controller = NavigationController::initialize(store);

        assert!(!controller.is_authenticated());
        assert_eq!(controller.current_page(), PageId::Home);
        assert_eq!(controller.screen(), Screen::Login);
    }

    #[test]
    fn test_initialize_restores_session() {
        let store = Arc::new(MemoryStore::from_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::CURRENT_PAGE, "claims"),
        ]));
        let controller = NavigationController::initialize(store);

        assert!(controller.is_authenticated());
        assert_eq!(controller.current_page(), PageId::Claims);
        assert_eq!(controller.screen(), Screen::Page(PageId::Claims));
    }

    #[test]
    fn test_initialize_coerces_unknown_page() {
        let store = Arc::new(MemoryStore::from_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::CURRENT_PAGE, "not-a-real-page"),
        ]));
        let controller = NavigationController::initialize(store);

        assert_eq!(controller.current_page(), PageId::Home);
    }

    #[test]
    fn test_only_literal_true_authenticates() {
        for value in ["false", "TRUE", "1", ""] {
            let store = Arc::new(MemoryStore::from_entries([(keys::IS_AUTHENTICATED, value)]));
            let controller = NavigationController::initialize(store);
            assert!(!controller.is_authenticated(), "value {value:?}");
        }
    }

    #[test]
    fn test_initialize_with_unavailable_store() {
        let store = Arc::new(FlakyStore::unavailable());
        let controller = NavigationController::initialize(store);

        assert!(!controller.is_authenticated());
        assert_eq!(controller.current_page(), PageId::Home);
    }

    #[test]
    fn test_navigate_valid_pages() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = NavigationController::initialize(store.clone());

        for page in PageId::all() {
            assert_eq!(controller.navigate(page.as_str()), page);
            assert_eq!(controller.current_page(), page);
            assert_eq!(stored(&store, keys::CURRENT_PAGE).as_deref(), Some(page.as_str()));
        }
    }

    #[test]
    fn test_navigate_unknown_page_goes_home() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = NavigationController::initialize(store.clone());
        controller.navigate("claims");

        for target in ["not-a-real-page", "", "CLAIMS", "claims/../admin"] {
            controller.navigate("claims");
            assert_eq!(controller.navigate(target), PageId::Home);
            assert_eq!(controller.current_page(), PageId::Home);
            assert_eq!(stored(&store, keys::CURRENT_PAGE).as_deref(), Some("home"));
        }
    }

    #[test]
    fn test_navigate_persists_canonical_name_for_aliases() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = NavigationController::initialize(store.clone());

        assert_eq!(controller.navigate("homepage"), PageId::Home);
        assert_eq!(stored(&store, keys::CURRENT_PAGE).as_deref(), Some("home"));
    }

    #[test]
    fn test_login_then_logout() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = NavigationController::initialize(store.clone());

        assert_eq!(controller.login(), PageId::Home);
        assert!(controller.is_authenticated());
        assert_eq!(stored(&store, keys::IS_AUTHENTICATED).as_deref(), Some("true"));
        assert_eq!(stored(&store, keys::CURRENT_PAGE).as_deref(), Some("home"));

        controller.navigate("hsa");
        controller.logout();

        assert!(!controller.is_authenticated());
        assert_eq!(stored(&store, keys::IS_AUTHENTICATED), None);
        assert_eq!(controller.current_page(), PageId::Hsa);
        assert_eq!(controller.screen(), Screen::Login);
    }

    #[test]
    fn test_login_returns_to_persisted_page() {
        let store = Arc::new(MemoryStore::from_entries([(keys::CURRENT_PAGE, "resources")]));
        let mut controller = NavigationController::initialize(store.clone());

        assert_eq!(controller.screen(), Screen::Login);
        assert_eq!(controller.login(), PageId::Resources);
        assert_eq!(controller.screen(), Screen::Page(PageId::Resources));
    }

    #[test]
    fn test_login_with_invalid_persisted_page() {
        let store = Arc::new(MemoryStore::from_entries([(keys::CURRENT_PAGE, "bogus")]));
        let mut controller = NavigationController::initialize(store.clone());

        assert_eq!(controller.login(), PageId::Home);
        assert_eq!(stored(&store, keys::CURRENT_PAGE).as_deref(), Some("home"));
    }

    #[test]
    fn test_transitions_complete_when_writes_fail() {
        let store = Arc::new(FlakyStore::default());
        let mut controller = NavigationController::initialize(store.clone());
        store.fail_writes(true);

        controller.login();
        assert!(controller.is_authenticated());

        controller.navigate("fsa");
        assert_eq!(controller.current_page(), PageId::Fsa);

        controller.logout();
        assert!(!controller.is_authenticated());

        assert!(store.inner.snapshot().is_empty());
    }

    #[test]
    fn test_convenience_wrappers_match_navigate() {
        let cases: [(fn(&mut NavigationController) -> PageId, PageId); 5] = [
            (NavigationController::navigate_home, PageId::Home),
            (NavigationController::navigate_to_profile, PageId::Profile),
            (NavigationController::navigate_to_admin, PageId::Admin),
            (
                NavigationController::navigate_to_message_center,
                PageId::MessageCenter,
            ),
            (NavigationController::navigate_back, PageId::Home),
        ];

        for (wrapper, target) in cases {
            let sugar_store = Arc::new(MemoryStore::new());
            let mut sugar = NavigationController::initialize(sugar_store.clone());
            sugar.navigate("claims");
            wrapper(&mut sugar);

            let plain_store = Arc::new(MemoryStore::new());
            let mut plain = NavigationController::initialize(plain_store.clone());
            plain.navigate("claims");
            plain.navigate(target.as_str());

            assert_eq!(sugar.navigation(), plain.navigation());
            assert_eq!(sugar.session(), plain.session());
            assert_eq!(sugar_store.snapshot(), plain_store.snapshot());
        }
    }

    #[test]
    fn test_reload_restores_navigation() {
        let store = Arc::new(MemoryStore::new());

        let mut first = NavigationController::initialize(store.clone());
        assert_eq!(first.screen(), Screen::Login);
        first.login();
        first.navigate("claims");

        let reloaded = NavigationController::initialize(store);
        assert_eq!(reloaded.screen(), Screen::Page(PageId::Claims));
    }
}
