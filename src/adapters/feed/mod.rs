//! Feed service adapters.
//!
//! - `HttpFeedService` - JSON client for the external feed generator
//! - `InMemoryFeedService` - records requests, for tests and development

mod http_client;
mod in_memory;

pub use http_client::HttpFeedService;
pub use in_memory::InMemoryFeedService;
