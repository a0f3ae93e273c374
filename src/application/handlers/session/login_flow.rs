//! OAuthLoginFlow - Authorization-code login against Patreon.
//!
//! `initiate` stores a state token in the session and sends the browser to
//! Patreon. `complete_callback` consumes that token, exchanges the code, and
//! stores the resulting identity.

use std::sync::Arc;

use reqwest::Url;

use super::SessionIdentityManager;
use crate::application::handlers::patronage::FeatureLevelResolver;
use crate::domain::identity::{Identity, IdentityError, StateToken};
use crate::ports::OAuthProvider;

/// Parameters of the provider's authorization endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizationEndpoint {
    pub authorize_url: String,
    pub client_id: String,
    pub redirect_url: String,
    pub scopes: String,
}

impl AuthorizationEndpoint {
    /// Builds the URL the browser is redirected to.
    pub fn url_for(&self, state: &StateToken) -> Result<String, IdentityError> {
        let url = Url::parse_with_params(
            &self.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("scope", self.scopes.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| IdentityError::internal(format!("Invalid authorize URL: {}", e)))?;

        Ok(url.into())
    }
}

/// Orchestrates the login round trip.
pub struct OAuthLoginFlow {
    provider: Arc<dyn OAuthProvider>,
    resolver: Arc<FeatureLevelResolver>,
    endpoint: AuthorizationEndpoint,
}

impl OAuthLoginFlow {
    pub fn new(
        provider: Arc<dyn OAuthProvider>,
        resolver: Arc<FeatureLevelResolver>,
        endpoint: AuthorizationEndpoint,
    ) -> Self {
        Self {
            provider,
            resolver,
            endpoint,
        }
    }

    /// Starts a login and returns the provider URL to redirect to.
    pub async fn initiate(&self, session: &SessionIdentityManager) -> Result<String, IdentityError> {
        let state = session.issue_state().await?;
        self.endpoint.url_for(&state)
    }

    /// Finishes a login from the provider's callback parameters.
    ///
    /// The stored state is consumed before anything else, so a replayed
    /// callback fails even if the first attempt did not complete.
    ///
    /// # Errors
    ///
    /// - `Authentication` - `state_param` does not match the stored state
    /// - `Validation` - the provider rejected `code`
    /// - `Internal` - session storage or profile fetch failed
    pub async fn complete_callback(
        &self,
        session: &SessionIdentityManager,
        state_param: &str,
        code: &str,
    ) -> Result<Identity, IdentityError> {
        let stored = session.take_state().await?;

        match stored {
            Some(state) if state.matches(state_param) => {}
            Some(_) => {
                tracing::warn!("OAuth callback state mismatch");
                return Err(IdentityError::authentication("invalid state"));
            }
            None => {
                tracing::warn!("OAuth callback without pending login");
                return Err(IdentityError::authentication("invalid state"));
            }
        }

        if code.trim().is_empty() {
            return Err(IdentityError::validation("missing authorization code"));
        }

        let token = self.provider.exchange_code(code).await.map_err(|e| {
            tracing::warn!(error = %e, "Authorization code exchange failed");
            IdentityError::validation(e.message)
        })?;

        let profile = self.provider.fetch_profile(&token).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch Patreon profile");
            IdentityError::internal(e.to_string())
        })?;

        let feature_level = self.resolver.by_patron_id(&profile.patron_id).await;

        let identity = Identity {
            user_id: profile.patron_id,
            full_name: profile.full_name,
            email: profile.email,
            profile_url: profile.profile_url,
            feature_level,
        };

        session.rotate_id().await?;
        session.set_identity(&identity).await?;

        tracing::info!(
            patron_id = %identity.user_id,
            feature_level = %identity.feature_level,
            "Patron logged in"
        );

        Ok(identity)
    }
}
