//! Feed service port - the external feed generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, FeedId};
use crate::domain::identity::Identity;

/// Feed creation request as submitted by the browser.
///
/// Passed through to the feed generator untouched apart from the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Link to the channel or playlist to publish.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Creates feeds on behalf of an identity.
///
/// The identity handed in carries an authoritative, freshly resolved
/// feature level; implementations may use it to cap what they create.
#[async_trait]
pub trait FeedService: Send + Sync {
    async fn create_feed(
        &self,
        request: &FeedRequest,
        identity: &Identity,
    ) -> Result<FeedId, DomainError>;
}
