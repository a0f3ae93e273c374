//! `tower-sessions` backed session storage.
//!
//! Wraps the `Session` extracted for the current request so the
//! application layer only ever sees the `SessionStorage` port.

use async_trait::async_trait;
use serde_json::Value;
use tower_sessions::Session;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SessionStorage;

/// Session storage bound to one request's `tower_sessions::Session`.
#[derive(Clone)]
pub struct TowerSessionStorage {
    session: Session,
}

impl TowerSessionStorage {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

fn session_error(operation: &str, err: tower_sessions::session::Error) -> DomainError {
    tracing::error!(operation, error = %err, "Session store failure");
    DomainError::new(
        ErrorCode::SessionError,
        format!("Failed to {} session value: {}", operation, err),
    )
}

#[async_trait]
impl SessionStorage for TowerSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        self.session
            .get_value(key)
            .await
            .map_err(|e| session_error("read", e))
    }

    async fn insert(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.session
            .insert_value(key, value)
            .await
            .map(|_| ())
            .map_err(|e| session_error("write", e))
    }

    async fn remove(&self, key: &str) -> Result<Option<Value>, DomainError> {
        self.session
            .remove_value(key)
            .await
            .map_err(|e| session_error("remove", e))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.session
            .flush()
            .await
            .map_err(|e| session_error("flush", e))
    }

    async fn cycle_id(&self) -> Result<(), DomainError> {
        self.session
            .cycle_id()
            .await
            .map_err(|e| session_error("cycle", e))
    }
}
