//! Session storage adapters.
//!
//! - `TowerSessionStorage` - cookie-backed sessions from `tower-sessions`
//! - `InMemorySessionStorage` - a single session held in memory, for tests

mod in_memory;
mod tower_session;

pub use in_memory::InMemorySessionStorage;
pub use tower_session::TowerSessionStorage;
