//! In-memory patronage adapters.
//!
//! Used by tests and by local development when no database is configured.

mod entitlement_store;
mod pledge_roster;

pub use entitlement_store::InMemoryEntitlementStore;
pub use pledge_roster::InMemoryPledgeRoster;
