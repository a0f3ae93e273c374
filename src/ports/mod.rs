//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionStorage` - Per-browser key/value state
//!
//! ## Provider Ports
//!
//! - `OAuthProvider` - Authorization-code exchange and profile lookup
//!
//! ## Patronage Ports
//!
//! - `PatronRoster` - Current pledge amount per patron
//! - `PledgeBookkeeper` - Webhook bookkeeping hook
//! - `EntitlementStore` - Persisted feature level per patron
//!
//! ## Feed Ports
//!
//! - `FeedService` - External feed generator

mod entitlement_store;
mod feed_service;
mod oauth_provider;
mod patron_roster;
mod pledge_bookkeeper;
mod session_storage;

pub use entitlement_store::EntitlementStore;
pub use feed_service::{FeedRequest, FeedService};
pub use oauth_provider::{AccessToken, OAuthProvider, ProviderProfile};
pub use patron_roster::PatronRoster;
pub use pledge_bookkeeper::PledgeBookkeeper;
pub use session_storage::SessionStorage;
