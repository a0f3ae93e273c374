//! HTTP error mapping.
//!
//! Every handler returns `ApiError` on failure so status codes are decided
//! in one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::identity::IdentityError;
use crate::domain::patronage::WebhookError;

/// JSON body for error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error_code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
    }

    /// Logs `message` and answers with a generic body.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %message, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Authentication(message) => Self::unauthorized(message),
            IdentityError::Validation(message) => Self::bad_request(message),
            IdentityError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", "No identity in session")
            }
            IdentityError::Internal(message) => Self::internal(message),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => Self::bad_request(err.message),
            ErrorCode::NotFound | ErrorCode::PatronNotFound => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.message)
            }
            ErrorCode::Unauthorized => Self::unauthorized(err.message),
            ErrorCode::Forbidden => Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", err.message),
            ErrorCode::ProviderError | ErrorCode::FeedServiceError => {
                tracing::error!(error = %err, "Upstream service failed");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Upstream service unavailable",
                )
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_WEBHOOK_SIGNATURE", err.to_string())
            }
            other => Self::new(other.status_code(), "WEBHOOK_ERROR", other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        let body = ErrorResponse::new(self.error_code, self.message);
        (self.status, Json(body)).into_response()
    }
}
