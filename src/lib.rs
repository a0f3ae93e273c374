//! Patron Sync - Patreon login and pledge webhooks for feed feature levels
//!
//! Patrons log in through Patreon OAuth; their pledge amount maps onto a
//! feature level that gates privileged feed creation. Pledge webhooks keep
//! the roster and stored entitlements current.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
