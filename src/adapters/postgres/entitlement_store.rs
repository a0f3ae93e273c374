//! PostgreSQL entitlement store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId};
use crate::domain::patronage::FeatureLevel;
use crate::ports::EntitlementStore;

/// Stores one absolute feature level per patron in `entitlements`.
///
/// Each write is a single upsert, so concurrent or repeated deliveries
/// converge on whichever level was written last.
pub struct PostgresEntitlementStore {
    pool: PgPool,
}

impl PostgresEntitlementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn level_from_row(value: i16) -> Result<FeatureLevel, DomainError> {
    u8::try_from(value).map(FeatureLevel::new).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid feature level value: {}", value),
        )
    })
}

#[async_trait]
impl EntitlementStore for PostgresEntitlementStore {
    async fn downgrade(
        &self,
        patron_id: &PatronId,
        level: FeatureLevel,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO entitlements (patron_id, feature_level, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (patron_id) DO UPDATE SET
                feature_level = EXCLUDED.feature_level,
                updated_at = NOW()
            "#,
        )
        .bind(patron_id.as_str())
        .bind(i16::from(level.rank()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update entitlement: {}", e),
            )
        })?;

        Ok(())
    }

    async fn level_of(&self, patron_id: &PatronId) -> Result<Option<FeatureLevel>, DomainError> {
        let row: Option<i16> =
            sqlx::query_scalar("SELECT feature_level FROM entitlements WHERE patron_id = $1")
                .bind(patron_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to read entitlement: {}", e),
                    )
                })?;

        row.map(level_from_row).transpose()
    }
}
