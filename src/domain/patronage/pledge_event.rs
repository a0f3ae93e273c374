//! Patreon pledge webhook payloads.
//!
//! Patreon delivers pledge changes as JSON:API documents. Only the fields
//! needed to keep the roster and entitlements in sync are captured.

use serde::{Deserialize, Serialize};

use super::webhook_errors::WebhookError;
use crate::domain::foundation::{PatronId, PledgeId, Timestamp};

/// Header carrying the hex HMAC of the body.
pub const SIGNATURE_HEADER: &str = "X-Patreon-Signature";

/// Header carrying the event name, e.g. `pledges:update`.
pub const EVENT_HEADER: &str = "X-Patreon-Event";

/// Top-level webhook document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PledgeWebhookPayload {
    pub data: PledgeRecord,
}

/// The pledge resource inside a webhook document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PledgeRecord {
    /// Pledge identifier.
    pub id: String,

    /// JSON:API resource type, normally `pledge`.
    #[serde(rename = "type", default)]
    pub resource_type: String,

    pub attributes: PledgeAttributes,

    pub relationships: PledgeRelationships,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PledgeAttributes {
    /// Pledge amount in cents.
    pub amount_cents: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declined_since: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pledge_cap_cents: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patron_pays_fees: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PledgeRelationships {
    pub patron: Relationship,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Relationship {
    pub data: ResourceRef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceRef {
    pub id: String,

    #[serde(rename = "type", default)]
    pub resource_type: String,
}

/// Pledge lifecycle events delivered by Patreon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PledgeEventType {
    /// `pledges:create`
    Created,
    /// `pledges:update`
    Updated,
    /// `pledges:delete`
    Deleted,
    /// Anything else, including a missing header.
    Other(String),
}

impl PledgeEventType {
    /// Parses the value of the `X-Patreon-Event` header.
    pub fn from_header(value: &str) -> Self {
        match value.trim() {
            "pledges:create" => Self::Created,
            "pledges:update" => Self::Updated,
            "pledges:delete" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "pledges:create",
            Self::Updated => "pledges:update",
            Self::Deleted => "pledges:delete",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for PledgeEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified pledge change, ready for dispatch.
///
/// Built from a body that already passed signature verification and dropped
/// once processing finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PledgeEvent {
    pub pledge_id: PledgeId,
    pub patron_id: PatronId,
    pub amount_cents: i64,
    pub event_type: PledgeEventType,
    pub created_at: Option<Timestamp>,
}

impl PledgeEvent {
    /// Parses a verified webhook body.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Malformed` when the body is not JSON, lacks the
    /// pledge structure, or carries empty identifiers.
    pub fn parse(body: &[u8], event_type: PledgeEventType) -> Result<Self, WebhookError> {
        let payload: PledgeWebhookPayload =
            serde_json::from_slice(body).map_err(|e| WebhookError::Malformed(e.to_string()))?;

        let record = payload.data;
        let pledge_id =
            PledgeId::new(record.id).map_err(|e| WebhookError::Malformed(e.to_string()))?;
        let patron_id = PatronId::new(record.relationships.patron.data.id)
            .map_err(|e| WebhookError::Malformed(e.to_string()))?;

        Ok(Self {
            pledge_id,
            patron_id,
            amount_cents: record.attributes.amount_cents,
            event_type,
            created_at: record.attributes.created_at,
        })
    }
}
