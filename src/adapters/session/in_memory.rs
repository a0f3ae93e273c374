//! In-memory session storage.
//!
//! Holds the values of a single browser session. Clones share state, so a
//! test can keep a handle and inspect what the application wrote.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SessionStorage;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    values: Arc<RwLock<HashMap<String, Value>>>,
    failing: Arc<AtomicBool>,
    id_cycles: Arc<AtomicU32>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of times the session id was rotated.
    pub fn id_cycles(&self) -> u32 {
        self.id_cycles.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::SessionError,
                "session store unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        self.check_available()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.check_available()?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<Value>, DomainError> {
        self.check_available()?;
        Ok(self.values.write().await.remove(key))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.check_available()?;
        self.values.write().await.clear();
        Ok(())
    }

    async fn cycle_id(&self) -> Result<(), DomainError> {
        self.check_available()?;
        self.id_cycles.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
