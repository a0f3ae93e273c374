//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, timestamps)
//! - `patronage` - Feature levels, tier thresholds, pledge webhooks
//! - `identity` - Session identity and OAuth state tokens

pub mod foundation;
pub mod identity;
pub mod patronage;
