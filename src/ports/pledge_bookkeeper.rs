//! Pledge bookkeeping port - the hook every verified webhook passes through.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::patronage::PledgeEvent;

/// Records pledge lifecycle changes.
///
/// # Contract
///
/// - `Created` and `Updated` upsert the pledge by id
/// - `Deleted` removes the pledge
/// - `Other` events are accepted without changes
///
/// Replaying the same event must leave the roster unchanged.
#[async_trait]
pub trait PledgeBookkeeper: Send + Sync {
    async fn record(&self, event: &PledgeEvent) -> Result<(), DomainError>;
}
