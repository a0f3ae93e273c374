//! In-memory pledge roster.
//!
//! Serves as both the `PatronRoster` read side and the `PledgeBookkeeper`
//! hook, mirroring the `pledges` table.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId, PledgeId};
use crate::domain::patronage::{PledgeEvent, PledgeEventType};
use crate::ports::{PatronRoster, PledgeBookkeeper};

#[derive(Debug, Clone)]
struct PledgeEntry {
    patron_id: PatronId,
    amount_cents: i64,
}

/// Pledge roster kept in a shared map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPledgeRoster {
    pledges: Arc<RwLock<HashMap<PledgeId, PledgeEntry>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryPledgeRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an active pledge.
    pub async fn insert(&self, pledge_id: PledgeId, patron_id: PatronId, amount_cents: i64) {
        self.pledges.write().await.insert(
            pledge_id,
            PledgeEntry {
                patron_id,
                amount_cents,
            },
        );
    }

    /// Makes every call fail with a database error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of active pledges.
    pub async fn pledge_count(&self) -> usize {
        self.pledges.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "pledge roster unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PatronRoster for InMemoryPledgeRoster {
    async fn pledge_amount(&self, patron_id: &PatronId) -> Result<Option<i64>, DomainError> {
        self.check_available()?;

        let pledges = self.pledges.read().await;
        Ok(pledges
            .values()
            .filter(|p| &p.patron_id == patron_id)
            .map(|p| p.amount_cents)
            .max())
    }
}

#[async_trait]
impl PledgeBookkeeper for InMemoryPledgeRoster {
    async fn record(&self, event: &PledgeEvent) -> Result<(), DomainError> {
        self.check_available()?;

        match event.event_type {
            PledgeEventType::Created | PledgeEventType::Updated => {
                self.insert(
                    event.pledge_id.clone(),
                    event.patron_id.clone(),
                    event.amount_cents,
                )
                .await;
            }
            PledgeEventType::Deleted => {
                self.pledges.write().await.remove(&event.pledge_id);
            }
            PledgeEventType::Other(_) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: PledgeEventType, pledge: &str, patron: &str, amount: i64) -> PledgeEvent {
        PledgeEvent {
            pledge_id: PledgeId::new(pledge).unwrap(),
            patron_id: PatronId::new(patron).unwrap(),
            amount_cents: amount,
            event_type,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn unknown_patron_has_no_pledge() {
        let roster = InMemoryPledgeRoster::new();
        let amount = roster
            .pledge_amount(&PatronId::new("nobody").unwrap())
            .await
            .unwrap();
        assert_eq!(amount, None);
    }

    #[tokio::test]
    async fn created_then_updated_keeps_latest_amount() {
        let roster = InMemoryPledgeRoster::new();
        roster
            .record(&event(PledgeEventType::Created, "p1", "42", 100))
            .await
            .unwrap();
        roster
            .record(&event(PledgeEventType::Updated, "p1", "42", 500))
            .await
            .unwrap();

        let amount = roster
            .pledge_amount(&PatronId::new("42").unwrap())
            .await
            .unwrap();
        assert_eq!(amount, Some(500));
        assert_eq!(roster.pledge_count().await, 1);
    }

    #[tokio::test]
    async fn deleted_removes_pledge() {
        let roster = InMemoryPledgeRoster::new();
        roster
            .record(&event(PledgeEventType::Created, "p1", "42", 300))
            .await
            .unwrap();
        roster
            .record(&event(PledgeEventType::Deleted, "p1", "42", 300))
            .await
            .unwrap();

        assert_eq!(roster.pledge_count().await, 0);
    }

    #[tokio::test]
    async fn other_events_leave_roster_untouched() {
        let roster = InMemoryPledgeRoster::new();
        roster
            .record(&event(PledgeEventType::Other("x".into()), "p1", "42", 300))
            .await
            .unwrap();

        assert_eq!(roster.pledge_count().await, 0);
    }

    #[tokio::test]
    async fn failing_roster_reports_database_error() {
        let roster = InMemoryPledgeRoster::new();
        roster.set_failing(true);

        let err = roster
            .pledge_amount(&PatronId::new("42").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
