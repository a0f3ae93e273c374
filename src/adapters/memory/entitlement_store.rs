//! In-memory entitlement store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId};
use crate::domain::patronage::FeatureLevel;
use crate::ports::EntitlementStore;

/// Entitlements kept in a shared map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntitlementStore {
    levels: Arc<RwLock<HashMap<PatronId, FeatureLevel>>>,
    failing: Arc<AtomicBool>,
    writes: Arc<AtomicU32>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a patron's level.
    pub async fn set(&self, patron_id: PatronId, level: FeatureLevel) {
        self.levels.write().await.insert(patron_id, level);
    }

    /// Makes every write fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `downgrade` calls that reached the store.
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlementStore {
    async fn downgrade(
        &self,
        patron_id: &PatronId,
        level: FeatureLevel,
    ) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "entitlement store unavailable",
            ));
        }

        self.levels.write().await.insert(patron_id.clone(), level);
        Ok(())
    }

    async fn level_of(&self, patron_id: &PatronId) -> Result<Option<FeatureLevel>, DomainError> {
        Ok(self.levels.read().await.get(patron_id).copied())
    }
}
