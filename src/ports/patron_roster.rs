//! Patron roster port - current pledge amounts by patron.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PatronId};

/// Read side of the pledge roster kept up to date by webhooks.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait PatronRoster: Send + Sync {
    /// Returns the patron's active pledge amount in cents, or `None` if the
    /// patron has no active pledge.
    async fn pledge_amount(&self, patron_id: &PatronId) -> Result<Option<i64>, DomainError>;
}
