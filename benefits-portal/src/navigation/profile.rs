//! Profile sub-section hand-off between sibling pages.
//!
//! Any page may ask for a profile sub-section through [`ProfileHints`]. The
//! request is stored (for a profile page that mounts later) and published
//! (for one that is already mounted). A mounted profile page consumes the
//! stored hint when it unmounts, so the hint applies to one visit only.

use std::sync::{Arc, Mutex};

use super::events::{EventBus, PortalEvent, Subscription};
use super::page::ProfileSubPageId;
use crate::store::{self, keys, SharedStore};

/// Writer side of the hand-off, usable from any page.
#[derive(Clone)]
pub struct ProfileHints {
    store: SharedStore,
    bus: EventBus<PortalEvent>,
}

impl ProfileHints {
    pub fn new(store: SharedStore, bus: EventBus<PortalEvent>) -> Self {
        Self { store, bus }
    }

    pub fn request(&self, sub_page: ProfileSubPageId) {
        store::write(
            self.store.as_ref(),
            keys::PROFILE_SUB_PAGE,
            sub_page.as_str(),
        );
        let delivered = self
            .bus
            .publish(&PortalEvent::ProfileSubPageRequested(sub_page));

        tracing::debug!(sub_page = %sub_page, delivered, "Profile sub-page requested");
    }
}

/// A profile page for as long as it is on screen.
pub struct MountedProfile {
    store: SharedStore,
    active: Arc<Mutex<ProfileSubPageId>>,
    _subscription: Subscription,
}

impl MountedProfile {
    pub fn mount(store: SharedStore, bus: &EventBus<PortalEvent>) -> Self {
        let initial = store::read(store.as_ref(), keys::PROFILE_SUB_PAGE)
            .map(|raw| ProfileSubPageId::resolve(&raw))
            .unwrap_or_default();
        let active = Arc::new(Mutex::new(initial));

        let sink = Arc::clone(&active);
        let subscription = bus.subscribe(move |event| match event {
            PortalEvent::ProfileSubPageRequested(sub_page) => {
                if let Ok(mut active) = sink.lock() {
                    *active = *sub_page;
                }
            }
        });

        Self {
            store,
            active,
            _subscription: subscription,
        }
    }

    pub fn active_sub_page(&self) -> ProfileSubPageId {
        self.active
            .lock()
            .map(|active| *active)
            .unwrap_or_default()
    }
}

impl Drop for MountedProfile {
    fn drop(&mut self) {
        store::erase(self.store.as_ref(), keys::PROFILE_SUB_PAGE);
    }
}
