//! Adapters - Implementations of ports and the HTTP surface.
//!
//! - `http` - axum routes, extractors, error mapping
//! - `patreon` - Patreon OAuth client and test double
//! - `session` - tower-sessions storage and in-memory double
//! - `postgres` - sqlx pledge roster and entitlement store
//! - `memory` - in-memory roster and entitlement store
//! - `feed` - feed service client and in-memory double

pub mod feed;
pub mod http;
pub mod memory;
pub mod patreon;
pub mod postgres;
pub mod session;
