//! Session extractors for axum.
//!
//! - `PatronSession` - the request's `SessionIdentityManager`
//! - `RequireIdentity` - the logged-in identity, 401 when anonymous
//! - `OptionalIdentity` - the logged-in identity, if any
//!
//! All three ride on the `tower_sessions::Session` that
//! `SessionManagerLayer` attaches to each request.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use super::error::ApiError;
use crate::adapters::session::TowerSessionStorage;
use crate::application::SessionIdentityManager;
use crate::domain::identity::{Identity, IdentityError};

/// Per-request session identity manager.
pub struct PatronSession(pub SessionIdentityManager);

#[async_trait]
impl<S> FromRequestParts<S> for PatronSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| ApiError::internal(message))?;

        let storage = Arc::new(TowerSessionStorage::new(session));
        Ok(PatronSession(SessionIdentityManager::new(storage)))
    }
}

/// Extractor that requires a logged-in patron.
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for RequireIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let PatronSession(session) = PatronSession::from_request_parts(parts, state).await?;

        match session.current_identity().await {
            Ok(identity) => Ok(RequireIdentity(identity)),
            Err(IdentityError::NotFound) => Err(ApiError::unauthorized("Login required")),
            Err(err) => Err(err.into()),
        }
    }
}

/// Extractor for pages that also serve anonymous visitors.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let PatronSession(session) = PatronSession::from_request_parts(parts, state).await?;

        match session.current_identity().await {
            Ok(identity) => Ok(OptionalIdentity(Some(identity))),
            Err(IdentityError::NotFound) => Ok(OptionalIdentity(None)),
            Err(err) => Err(err.into()),
        }
    }
}
