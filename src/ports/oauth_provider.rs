//! OAuth provider port for the authorization-code exchange.
//!
//! Implementations exist for Patreon (reqwest) and an in-process mock used
//! by tests.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, PatronId};

/// Bearer token returned by the token endpoint.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Profile of the user who authorized the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub patron_id: PatronId,
    pub full_name: String,
    pub email: String,
    pub profile_url: String,
}

/// Performs the provider side of the login round trip.
///
/// # Contract
///
/// Both calls are single-attempt and must be bounded by a timeout. Dropping
/// the returned future cancels the request.
///
/// - `exchange_code` returns `ErrorCode::ValidationFailed` when the provider
///   rejects the code, `ErrorCode::ProviderError` when it is unreachable
/// - `fetch_profile` returns `ErrorCode::ProviderError` on any failure
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, DomainError>;

    /// Fetches the profile of the user the token belongs to.
    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProviderProfile, DomainError>;
}
