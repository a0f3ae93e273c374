//! HTTP adapter - axum routes for login, webhooks, and the patron API.
//!
//! - `GET /login`, `GET /patreon`, `GET /logout` - OAuth round trip
//! - `GET /api/identity` - Current session identity
//! - `POST /api/create` - Privileged feed creation
//! - `POST /api/webhooks` - Patreon pledge webhooks
//! - `GET /api/ping` - Liveness

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;
pub use routes::{app_router, RouterSettings};
