//! Identity and login errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by session identity handling and the OAuth login flow.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The request could not be tied to the login attempt that started it.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The caller supplied something unusable (bad code, missing parameter).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Nobody is logged in on this session.
    #[error("No identity in session")]
    NotFound,

    /// Session storage or provider failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the session is simply anonymous.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IdentityError::NotFound)
    }
}

impl From<DomainError> for IdentityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => IdentityError::Validation(err.message),
            ErrorCode::Unauthorized | ErrorCode::Forbidden => {
                IdentityError::Authentication(err.message)
            }
            _ => IdentityError::Internal(err.to_string()),
        }
    }
}
