//! Application handlers.
//!
//! - `session` - Login round trip and session identity
//! - `patronage` - Feature level resolution and pledge webhooks
//! - `feed` - Privileged feed creation

pub mod feed;
pub mod patronage;
pub mod session;

pub use feed::{CreateFeedCommand, CreateFeedHandler};
pub use patronage::{
    FeatureLevelResolver, ProcessPledgeWebhookCommand, ProcessPledgeWebhookResult,
    WebhookEventProcessor,
};
pub use session::{AuthorizationEndpoint, OAuthLoginFlow, SessionIdentityManager};
