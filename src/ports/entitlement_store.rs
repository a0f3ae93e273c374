//! Entitlement store port - persisted feature level per patron.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PatronId};
use crate::domain::patronage::FeatureLevel;

/// Persists the feature level each patron is entitled to.
///
/// # Contract
///
/// `downgrade` writes an absolute level. Applying the same
/// `(patron_id, level)` pair any number of times leaves the store at
/// `level`, so duplicate or reordered deliveries are harmless. Concurrent
/// writers are serialized by the implementation.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Sets the patron's level.
    async fn downgrade(&self, patron_id: &PatronId, level: FeatureLevel)
        -> Result<(), DomainError>;

    /// Returns the stored level, if any was ever written.
    async fn level_of(&self, patron_id: &PatronId) -> Result<Option<FeatureLevel>, DomainError>;
}
