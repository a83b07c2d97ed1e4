use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{health_check, index, not_found},
    auth::{login_handler, login_page, logout_handler},
    metrics::metrics,
    navigation::{navigate_handler, profile_section_handler},
};
use crate::middleware::metrics::http_metrics_middleware;
use crate::middleware::session_lock::{serialize_session_requests, SESSION_COOKIE};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE)
        .with_secure(state.session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.session.inactivity_hours,
        )));

    Router::new()
        .route("/", get(index))
        .route("/login", get(login_page).post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/navigate/:page", get(navigate_handler))
        .route("/profile/:section", get(profile_section_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(http_metrics_middleware))
        .fallback(not_found)
        .layer(session_layer)
        .layer(from_fn_with_state(
            state.session_locks.clone(),
            serialize_session_requests,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
