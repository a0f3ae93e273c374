//! Patreon OAuth adapters.
//!
//! Implementations of the `OAuthProvider` port:
//!
//! - `client` - Production Patreon API client over reqwest
//! - `mock` - Test implementation that never leaves the process

mod client;
mod mock;

pub use client::{PatreonOAuthClient, PatreonOAuthConfig};
pub use mock::MockOAuthProvider;
