//! Patronage handlers.
//!
//! - `FeatureLevelResolver` - Patron or amount to feature level
//! - `WebhookEventProcessor` - Verified pledge webhooks to roster and entitlements

mod feature_level_resolver;
mod process_pledge_webhook;

pub use feature_level_resolver::FeatureLevelResolver;
pub use process_pledge_webhook::{
    ProcessPledgeWebhookCommand, ProcessPledgeWebhookResult, WebhookEventProcessor,
};
