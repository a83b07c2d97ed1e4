use axum::{extract::Path, response::Redirect};

use crate::models::PortalSession;
use crate::navigation::ProfileSubPageId;

/// Switch pages. Unknown targets land on the home page.
///
/// Logged-out sessions only ever see the login screen, so their requests
/// leave the persisted page untouched.
pub async fn navigate_handler(Path(page): Path<String>, portal_session: PortalSession) -> Redirect {
    {
        let mut portal = portal_session.portal();
        if !portal.controller().is_authenticated() {
            tracing::debug!(requested = %page, "Ignoring navigation from logged-out session");
            return Redirect::to("/");
        }
        portal.controller_mut().navigate(&page);
    }
    portal_session.commit().await;

    Redirect::to("/")
}

/// Open the profile page on a specific sub-section.
pub async fn profile_section_handler(
    Path(section): Path<String>,
    portal_session: PortalSession,
) -> Redirect {
    {
        let mut portal = portal_session.portal();
        if !portal.controller().is_authenticated() {
            tracing::debug!(requested = %section, "Ignoring profile request from logged-out session");
            return Redirect::to("/");
        }
        portal.request_profile_sub_page(ProfileSubPageId::resolve(&section));
    }
    portal_session.commit().await;

    Redirect::to("/")
}
