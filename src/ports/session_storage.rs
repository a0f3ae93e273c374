//! Session storage port - per-browser key/value state.
//!
//! One instance is bound to one browser session for the lifetime of a
//! request. Values are JSON so any serializable domain type can be stored.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::DomainError;

/// Key/value store scoped to a single browser session.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` for keys that were never written or were removed
/// - Make `remove` return the previous value so callers can take-and-clear
/// - Report storage failures as `ErrorCode::SessionError`
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError>;

    /// Writes a value, replacing any previous one.
    async fn insert(&self, key: &str, value: Value) -> Result<(), DomainError>;

    /// Removes a value, returning what was stored.
    async fn remove(&self, key: &str) -> Result<Option<Value>, DomainError>;

    /// Drops everything stored for this session.
    async fn clear(&self) -> Result<(), DomainError>;

    /// Moves the stored values to a fresh session id.
    async fn cycle_id(&self) -> Result<(), DomainError>;
}
