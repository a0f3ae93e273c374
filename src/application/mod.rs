//! Application layer - Handlers orchestrating domain operations.
//!
//! This layer coordinates between ports. Handlers are constructed once with
//! their collaborators; per-request state (the browser session) is passed
//! in explicitly.

pub mod handlers;

pub use handlers::{
    // Session handlers
    AuthorizationEndpoint, OAuthLoginFlow, SessionIdentityManager,
    // Patronage handlers
    FeatureLevelResolver, ProcessPledgeWebhookCommand, ProcessPledgeWebhookResult,
    WebhookEventProcessor,
    // Feed handlers
    CreateFeedCommand, CreateFeedHandler,
};
