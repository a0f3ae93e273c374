//! Patreon OAuth client.
//!
//! Performs the authorization-code exchange against Patreon's token
//! endpoint and fetches the current user's profile from the identity API.
//!
//! Every request is single-attempt and carries the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId};
use crate::ports::{AccessToken, OAuthProvider, ProviderProfile};

/// Configuration for the Patreon client.
#[derive(Debug, Clone)]
pub struct PatreonOAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_url: String,
    pub token_url: String,
    pub identity_url: String,
    pub timeout: Duration,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

/// JSON:API document returned by the identity endpoint.
#[derive(Debug, Deserialize)]
struct UserDocument {
    data: UserResource,
}

#[derive(Debug, Deserialize)]
struct UserResource {
    id: String,
    #[serde(default)]
    attributes: UserAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct UserAttributes {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    url: String,
}

/// Patreon implementation of `OAuthProvider`.
pub struct PatreonOAuthClient {
    config: PatreonOAuthConfig,
    http_client: reqwest::Client,
}

impl PatreonOAuthClient {
    /// Creates a client whose requests time out after `config.timeout`.
    pub fn new(config: PatreonOAuthConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

fn provider_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::ProviderError, message)
}

#[async_trait]
impl OAuthProvider for PatreonOAuthClient {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, DomainError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Patreon token exchange request failed");
                provider_error(format!("Token exchange failed: {}", e))
            })?;

        let status = response.status();
        if status.is_client_error() {
            tracing::warn!(%status, "Patreon rejected authorization code");
            return Err(DomainError::validation(
                "code",
                format!("Authorization code rejected ({})", status),
            ));
        }
        if !status.is_success() {
            tracing::error!(%status, "Patreon token endpoint returned error");
            return Err(provider_error(format!("Token endpoint returned {}", status)));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Patreon token response");
            provider_error(format!("Invalid token response: {}", e))
        })?;

        Ok(AccessToken::new(token.access_token))
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProviderProfile, DomainError> {
        let response = self
            .http_client
            .get(&self.config.identity_url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Patreon identity request failed");
                provider_error(format!("Profile fetch failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "Patreon identity endpoint returned error");
            return Err(provider_error(format!(
                "Identity endpoint returned {}",
                status
            )));
        }

        let document: UserDocument = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Patreon identity response");
            provider_error(format!("Invalid identity response: {}", e))
        })?;

        let patron_id = PatronId::new(document.data.id)
            .map_err(|e| provider_error(format!("Invalid user id: {}", e)))?;

        Ok(ProviderProfile {
            patron_id,
            full_name: document.data.attributes.full_name,
            email: document.data.attributes.email.unwrap_or_default(),
            profile_url: document.data.attributes.url,
        })
    }
}
