//! PostgreSQL pledge roster.
//!
//! Implements both `PatronRoster` and `PledgeBookkeeper` over the `pledges`
//! table so the webhook hook and level lookups share one source of truth.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId};
use crate::domain::patronage::{PledgeEvent, PledgeEventType};
use crate::ports::{PatronRoster, PledgeBookkeeper};

pub struct PostgresPledgeStore {
    pool: PgPool,
}

impl PostgresPledgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert(&self, event: &PledgeEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO pledges (pledge_id, patron_id, amount_cents, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (pledge_id) DO UPDATE SET
                patron_id = EXCLUDED.patron_id,
                amount_cents = EXCLUDED.amount_cents,
                created_at = COALESCE(pledges.created_at, EXCLUDED.created_at),
                updated_at = NOW()
            "#,
        )
        .bind(event.pledge_id.as_str())
        .bind(event.patron_id.as_str())
        .bind(event.amount_cents)
        .bind(event.created_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save pledge: {}", e))
        })?;

        Ok(())
    }

    async fn delete(&self, event: &PledgeEvent) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM pledges WHERE pledge_id = $1")
            .bind(event.pledge_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete pledge: {}", e),
                )
            })?;

        Ok(())
    }
}

#[async_trait]
impl PatronRoster for PostgresPledgeStore {
    async fn pledge_amount(&self, patron_id: &PatronId) -> Result<Option<i64>, DomainError> {
        let amount: Option<i64> =
            sqlx::query_scalar("SELECT MAX(amount_cents) FROM pledges WHERE patron_id = $1")
                .bind(patron_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to look up pledge: {}", e),
                    )
                })?;

        Ok(amount)
    }
}

#[async_trait]
impl PledgeBookkeeper for PostgresPledgeStore {
    async fn record(&self, event: &PledgeEvent) -> Result<(), DomainError> {
        match event.event_type {
            PledgeEventType::Created | PledgeEventType::Updated => self.upsert(event).await,
            PledgeEventType::Deleted => self.delete(event).await,
            PledgeEventType::Other(_) => Ok(()),
        }
    }
}
