use axum::{extract::State, http::Uri, response::Html};
use service_core::error::AppError;

use crate::models::PortalSession;
use crate::AppState;

/// Render whatever the session currently sees: the login screen or the
/// active page.
pub async fn index(
    State(state): State<AppState>,
    portal_session: PortalSession,
) -> Result<Html<String>, AppError> {
    let html = {
        let portal = portal_session.portal();
        portal
            .render(&state.registry)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?
    };

    // Rendering may consume the profile hint.
    portal_session.commit().await;
    Ok(Html(html))
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
