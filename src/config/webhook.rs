//! Webhook configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Patreon webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret shown on the Patreon webhook page
    pub secret: SecretString,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK__SECRET"));
        }
        Ok(())
    }
}
