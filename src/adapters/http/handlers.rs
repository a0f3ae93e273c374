//! HTTP handlers for login, webhooks, and patron API endpoints.
//!
//! These handlers connect axum routes to the application layer.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::{
    CreateFeedCommand, CreateFeedHandler, FeatureLevelResolver, OAuthLoginFlow,
    ProcessPledgeWebhookCommand, WebhookEventProcessor,
};
use crate::domain::patronage::{EVENT_HEADER, SIGNATURE_HEADER};
use crate::ports::FeedRequest;

use super::dto::{CallbackParams, CreateFeedResponse, IdentityResponse};
use super::error::ApiError;
use super::extractors::{OptionalIdentity, PatronSession, RequireIdentity};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared handler dependencies, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub login_flow: Arc<OAuthLoginFlow>,
    pub resolver: Arc<FeatureLevelResolver>,
    pub webhook_processor: Arc<WebhookEventProcessor>,
    pub create_feed: Arc<CreateFeedHandler>,
}

/// 302 with a `Location` header.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Browser Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /login - Start the Patreon authorization round trip
pub async fn login(
    State(state): State<AppState>,
    PatronSession(session): PatronSession,
) -> Result<Response, ApiError> {
    let url = state.login_flow.initiate(&session).await?;
    Ok(found(&url))
}

/// GET /patreon - OAuth callback
pub async fn patreon_callback(
    State(state): State<AppState>,
    PatronSession(session): PatronSession,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    if let Some(error) = params.error.as_deref() {
        tracing::info!(error, "Patron declined authorization");
        session.take_state().await?;
        return Err(ApiError::bad_request("Authorization was not granted"));
    }

    // Absent parameters still go through the flow so the pending state is consumed
    let state_param = params.state.unwrap_or_default();
    let code = params.code.unwrap_or_default();

    state
        .login_flow
        .complete_callback(&session, &state_param, &code)
        .await?;

    Ok(found("/"))
}

/// GET /logout - Forget the session identity
pub async fn logout(PatronSession(session): PatronSession) -> Result<Response, ApiError> {
    session.clear().await?;
    Ok(found("/"))
}

// ════════════════════════════════════════════════════════════════════════════════
// API Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/identity - Current identity with a freshly resolved level
pub async fn get_identity(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
) -> Json<IdentityResponse> {
    let Some(identity) = identity else {
        return Json(IdentityResponse::anonymous());
    };

    let level = state.resolver.by_patron_id(&identity.user_id).await;
    Json(IdentityResponse::Patron(identity.with_feature_level(level)))
}

/// POST /api/create - Create a feed for the logged-in patron
pub async fn create_feed(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(request): Json<FeedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateFeedCommand { request, identity };

    let id = state.create_feed.handle(cmd).await?;

    Ok(Json(CreateFeedResponse { id }))
}

/// POST /api/webhooks - Patreon pledge notifications
///
/// Answers 204 once the signature checks out, whatever happens afterwards.
pub async fn handle_patreon_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let cmd = ProcessPledgeWebhookCommand {
        payload: body.to_vec(),
        signature: header_value(SIGNATURE_HEADER),
        event: header_value(EVENT_HEADER),
    };

    match state.webhook_processor.handle(cmd).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// GET /api/ping - Liveness probe
pub async fn ping() -> &'static str {
    "ok"
}
