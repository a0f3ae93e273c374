//! PostgreSQL adapters - Database implementations for patronage ports.
//!
//! - `PostgresPledgeStore` - Pledge roster and bookkeeping hook
//! - `PostgresEntitlementStore` - Persisted feature levels

mod entitlement_store;
mod pledge_store;

pub use entitlement_store::PostgresEntitlementStore;
pub use pledge_store::PostgresPledgeStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool sized from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await?;

    Ok(pool)
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))
}
