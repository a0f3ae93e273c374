//! Axum router configuration.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use super::handlers::{
    create_feed, get_identity, handle_patreon_webhook, login, logout, patreon_callback, ping,
    AppState,
};
use crate::config::AppConfig;

/// Cookie and timeout settings for the router's middleware stack.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub request_timeout: Duration,
    /// Capacity of the session store
    pub max_sessions: u64,
}

impl RouterSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            secure_cookie: config.session.secure(&config.server.environment),
            request_timeout: config.server.request_timeout(),
            max_sessions: config.session.max_sessions,
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            cookie_name: "patron_sync".to_string(),
            secure_cookie: false,
            request_timeout: Duration::from_secs(30),
            max_sessions: 10_000,
        }
    }
}

/// Browser-facing login routes.
///
/// - `GET /login` - Redirect to Patreon
/// - `GET /patreon` - OAuth callback
/// - `GET /logout` - Clear the session
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/patreon", get(patreon_callback))
        .route("/logout", get(logout))
}

/// JSON API routes, mounted under `/api`.
///
/// - `GET /identity` - Session identity or `{"anonymous": true}`
/// - `POST /create` - Create a feed (requires login)
/// - `POST /webhooks` - Patreon pledge webhooks (signature verified, no login)
/// - `GET /ping` - Liveness
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/identity", get(get_identity))
        .route("/create", post(create_feed))
        .route("/webhooks", post(handle_patreon_webhook))
        .route("/ping", get(ping))
}

/// Build the complete application router.
pub fn app_router(state: AppState, settings: RouterSettings) -> Router {
    let session_layer = SessionManagerLayer::new(MokaStore::new(Some(settings.max_sessions)))
        .with_name(settings.cookie_name)
        .with_secure(settings.secure_cookie)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnSessionEnd);

    Router::new()
        .merge(auth_routes())
        .nest("/api", api_routes())
        .with_state(state)
        .layer(session_layer)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http())
}
