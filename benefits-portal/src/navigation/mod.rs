pub mod controller;
pub mod events;
pub mod page;
pub mod profile;
pub mod registry;

pub use controller::{NavigationController, NavigationState, Screen, SessionState};
pub use events::{EventBus, PortalEvent, Subscription};
pub use page::{NavSection, PageId, ProfileSubPageId};
pub use profile::{MountedProfile, ProfileHints};
pub use registry::{PageContext, PageEntry, PageRegistry};
