//! SessionIdentityManager - CSRF state and identity for one browser session.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::identity::{Identity, IdentityError, StateToken};
use crate::ports::SessionStorage;

const STATE_KEY: &str = "oauth_state";
const IDENTITY_KEY: &str = "identity";

/// Owns the login state token and the cached identity of one session.
///
/// Constructed per request around that request's session storage.
pub struct SessionIdentityManager {
    storage: Arc<dyn SessionStorage>,
}

impl SessionIdentityManager {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Mints a fresh state token and stores it, replacing any previous one.
    pub async fn issue_state(&self) -> Result<StateToken, IdentityError> {
        let token = StateToken::generate();

        self.storage
            .insert(STATE_KEY, Value::String(token.as_str().to_string()))
            .await
            .map_err(|e| IdentityError::internal(format!("Failed to store state: {}", e)))?;

        Ok(token)
    }

    /// Returns the stored state token without consuming it.
    pub async fn current_state(&self) -> Result<Option<StateToken>, IdentityError> {
        let value = self.storage.get(STATE_KEY).await?;
        Ok(value.and_then(state_from_value))
    }

    /// Removes and returns the stored state token.
    ///
    /// A token can only be taken once; a second call returns `None`.
    pub async fn take_state(&self) -> Result<Option<StateToken>, IdentityError> {
        let value = self.storage.remove(STATE_KEY).await?;
        Ok(value.and_then(state_from_value))
    }

    /// Issues a new session id, keeping stored values. Called on login.
    pub async fn rotate_id(&self) -> Result<(), IdentityError> {
        self.storage
            .cycle_id()
            .await
            .map_err(|e| IdentityError::internal(format!("Failed to rotate session: {}", e)))
    }

    pub async fn set_identity(&self, identity: &Identity) -> Result<(), IdentityError> {
        let value = serde_json::to_value(identity)
            .map_err(|e| IdentityError::internal(format!("Failed to encode identity: {}", e)))?;

        self.storage.insert(IDENTITY_KEY, value).await?;
        Ok(())
    }

    /// Returns the logged-in identity.
    ///
    /// # Errors
    ///
    /// - `NotFound` - nobody is logged in on this session
    /// - `Internal` - storage failed or holds an unreadable identity
    pub async fn current_identity(&self) -> Result<Identity, IdentityError> {
        let value = self
            .storage
            .get(IDENTITY_KEY)
            .await?
            .ok_or(IdentityError::NotFound)?;

        serde_json::from_value(value)
            .map_err(|e| IdentityError::internal(format!("Failed to decode identity: {}", e)))
    }

    /// Drops the identity and any pending state.
    pub async fn clear(&self) -> Result<(), IdentityError> {
        self.storage.clear().await?;
        Ok(())
    }
}

fn state_from_value(value: Value) -> Option<StateToken> {
    match value {
        Value::String(s) if !s.is_empty() => Some(StateToken::from_stored(s)),
        _ => None,
    }
}
