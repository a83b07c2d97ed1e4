use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::PortalSession;
use crate::pages::LoginTemplate;

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub username: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn hx_redirect(location: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("hx-redirect", HeaderValue::from_static(location));
    (StatusCode::OK, headers, "").into_response()
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

pub async fn login_handler(
    portal_session: PortalSession,
    Form(payload): Form<LoginRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        tracing::debug!(error = %e, "Rejected login form");
        // Return error fragment for HTMX
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html("<p class='text-red-500 text-sm'>Please enter your username or email address</p>"),
        )
            .into_response();
    }

    let page = {
        let mut portal = portal_session.portal();
        portal.controller_mut().login()
    };
    portal_session.commit().await;

    tracing::info!(
        username = %payload.username.trim(),
        page = %page,
        "User logged in successfully"
    );

    hx_redirect("/")
}

pub async fn logout_handler(portal_session: PortalSession) -> Response {
    {
        let mut portal = portal_session.portal();
        portal.controller_mut().logout();
    }
    portal_session.commit().await;

    hx_redirect("/")
}
