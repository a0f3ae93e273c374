//! Webhook error types for Patreon pledge notifications.
//!
//! Authentication failures are the only errors the provider ever sees.
//! Everything that goes wrong after the signature checks out is logged and
//! acknowledged, because Patreon suspends subscriptions that keep failing.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook handling.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `X-Patreon-Signature` header was absent.
    #[error("Missing signature header")]
    MissingSignature,

    /// The signature did not match the request body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// No shared secret is configured, so nothing can be verified.
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    /// The verified body could not be read as a pledge record.
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The bookkeeping hook rejected the event.
    #[error("Bookkeeping failed: {0}")]
    Bookkeeping(String),

    /// Writing the patron's entitlement failed.
    #[error("Entitlement update failed: {0}")]
    Entitlement(String),
}

impl WebhookError {
    /// Returns true if the request never proved it came from the provider.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature | WebhookError::InvalidSignature
        )
    }

    /// Maps the error to the HTTP status returned to the provider.
    ///
    /// - 401: signature missing or wrong
    /// - 500: verification could not run at all
    /// - 204: post-verification failures, acknowledged so delivery continues
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }

            WebhookError::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,

            WebhookError::Malformed(_)
            | WebhookError::Bookkeeping(_)
            | WebhookError::Entitlement(_) => StatusCode::NO_CONTENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_correctly() {
        assert_eq!(
            format!("{}", WebhookError::InvalidSignature),
            "Invalid signature"
        );
    }

    #[test]
    fn malformed_displays_reason() {
        let err = WebhookError::Malformed("missing field `data`".to_string());
        assert_eq!(format!("{}", err), "Malformed payload: missing field `data`");
    }

    #[test]
    fn signature_failures_are_unauthorized() {
        assert_eq!(
            WebhookError::MissingSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::InvalidSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert!(WebhookError::InvalidSignature.is_authentication_failure());
    }

    #[test]
    fn missing_secret_is_server_error() {
        assert_eq!(
            WebhookError::SecretNotConfigured.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!WebhookError::SecretNotConfigured.is_authentication_failure());
    }

    #[test]
    fn processing_failures_are_acknowledged() {
        for err in [
            WebhookError::Malformed("bad json".into()),
            WebhookError::Bookkeeping("db down".into()),
            WebhookError::Entitlement("db down".into()),
        ] {
            assert!(err.status_code().is_success(), "{} should be 2xx", err);
            assert!(!err.is_authentication_failure());
        }
    }
}
