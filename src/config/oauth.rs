//! Patreon OAuth configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// OAuth client registration and provider endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthConfig {
    /// Client ID from the Patreon developer portal
    pub client_id: String,

    /// Client secret from the Patreon developer portal
    pub client_secret: SecretString,

    /// Callback URL registered with Patreon (points at `/patreon`)
    pub redirect_url: String,

    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Space-separated scopes requested at login
    #[serde(default = "default_scopes")]
    pub scopes: String,

    /// Timeout for each call to Patreon, in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl OAuthConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Validate OAuth configuration
    ///
    /// Every URL must parse; in production every URL must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__CLIENT_SECRET"));
        }
        if self.redirect_url.is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__REDIRECT_URL"));
        }
        if self.provider_timeout_secs == 0 || self.provider_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout("provider_timeout_secs"));
        }

        for (name, url) in [
            ("redirect_url", &self.redirect_url),
            ("authorize_url", &self.authorize_url),
            ("token_url", &self.token_url),
            ("identity_url", &self.identity_url),
        ] {
            let parsed = reqwest::Url::parse(url).map_err(|_| ValidationError::InvalidUrl(name))?;
            if *environment == Environment::Production && parsed.scheme() != "https" {
                return Err(ValidationError::UrlMustBeHttps(name));
            }
        }

        Ok(())
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: SecretString::new(String::new()),
            redirect_url: String::new(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            identity_url: default_identity_url(),
            scopes: default_scopes(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_authorize_url() -> String {
    "https://www.patreon.com/oauth2/authorize".to_string()
}

fn default_token_url() -> String {
    "https://www.patreon.com/api/oauth2/token".to_string()
}

fn default_identity_url() -> String {
    "https://www.patreon.com/api/oauth2/api/current_user".to_string()
}

fn default_scopes() -> String {
    "users pledges-to-me my-campaign".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}
