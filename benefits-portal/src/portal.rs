//! Root composition of one portal instance: the store, the event bus, the
//! navigation controller and the profile hand-off all share one lifetime.

use askama::Template;

use crate::navigation::{
    controller::{NavigationController, Screen},
    events::{EventBus, PortalEvent},
    page::{PageId, ProfileSubPageId},
    profile::ProfileHints,
    registry::{PageContext, PageRegistry},
};
use crate::pages::LoginTemplate;
use crate::store::SharedStore;

pub struct Portal {
    store: SharedStore,
    bus: EventBus<PortalEvent>,
    controller: NavigationController,
    hints: ProfileHints,
}

impl Portal {
    pub fn new(store: SharedStore) -> Self {
        let bus = EventBus::new();
        let controller = NavigationController::initialize(SharedStore::clone(&store));
        let hints = ProfileHints::new(SharedStore::clone(&store), bus.clone());

        Self {
            store,
            bus,
            controller,
            hints,
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.controller
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    /// Pre-select a profile sub-section and switch to the profile page.
    pub fn request_profile_sub_page(&mut self, sub_page: ProfileSubPageId) -> PageId {
        self.hints.request(sub_page);
        self.controller.navigate_to_profile()
    }

    pub fn render(&self, registry: &PageRegistry) -> askama::Result<String> {
        match self.screen() {
            Screen::Login => LoginTemplate::default().render(),
            Screen::Page(page) => {
                let ctx = PageContext::new(page, &self.store, &self.bus);
                registry.render(&ctx)
            }
        }
    }
}
