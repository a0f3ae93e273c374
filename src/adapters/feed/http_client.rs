//! HTTP client for the feed-generation service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, FeedId, PatronId};
use crate::domain::identity::Identity;
use crate::domain::patronage::FeatureLevel;
use crate::ports::{FeedRequest, FeedService};

/// Body posted to the feed generator.
#[derive(Debug, Serialize)]
struct CreateFeedBody<'a> {
    #[serde(flatten)]
    request: &'a FeedRequest,
    user_id: &'a PatronId,
    feature_level: FeatureLevel,
}

#[derive(Debug, Deserialize)]
struct CreateFeedResponse {
    id: String,
}

/// `FeedService` backed by the feed generator's HTTP API.
pub struct HttpFeedService {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpFeedService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            base_url: base_url.into(),
            http_client,
        })
    }

    fn feeds_url(&self) -> String {
        format!("{}/feeds", self.base_url.trim_end_matches('/'))
    }
}

fn feed_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::FeedServiceError, message)
}

#[async_trait]
impl FeedService for HttpFeedService {
    async fn create_feed(
        &self,
        request: &FeedRequest,
        identity: &Identity,
    ) -> Result<FeedId, DomainError> {
        let body = CreateFeedBody {
            request,
            user_id: &identity.user_id,
            feature_level: identity.feature_level,
        };

        let response = self
            .http_client
            .post(self.feeds_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Feed service request failed");
                feed_error(format!("Feed service unreachable: {}", e))
            })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(DomainError::validation(
                "url",
                format!("Feed service rejected request ({})", status),
            ));
        }
        if !status.is_success() {
            tracing::error!(%status, "Feed service returned error");
            return Err(feed_error(format!("Feed service returned {}", status)));
        }

        let created: CreateFeedResponse = response
            .json()
            .await
            .map_err(|e| feed_error(format!("Invalid feed service response: {}", e)))?;

        FeedId::new(created.id).map_err(|e| feed_error(e.to_string()))
    }
}
