//! Patronage module - pledges, feature levels, and webhook verification.
//!
//! Maps what Patreon tells us about a patron's pledge onto the feature level
//! they are entitled to.

mod feature_level;
mod pledge_event;
mod tier_table;
mod webhook_errors;
mod webhook_verifier;

pub use feature_level::FeatureLevel;
pub use pledge_event::{
    PledgeAttributes, PledgeEvent, PledgeEventType, PledgeRecord, PledgeRelationships,
    PledgeWebhookPayload, Relationship, ResourceRef, EVENT_HEADER, SIGNATURE_HEADER,
};
pub use tier_table::{TierTable, TierThreshold};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign, WebhookSignatureVerifier};
