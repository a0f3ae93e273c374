//! CreateFeedHandler - Command handler for privileged feed creation.

use std::sync::Arc;

use crate::application::handlers::patronage::FeatureLevelResolver;
use crate::domain::foundation::{DomainError, FeedId};
use crate::domain::identity::Identity;
use crate::ports::{FeedRequest, FeedService};

/// Command to create a feed for the logged-in patron.
#[derive(Debug, Clone)]
pub struct CreateFeedCommand {
    pub request: FeedRequest,
    /// Identity as cached in the session; its level is not trusted.
    pub identity: Identity,
}

/// Handler for feed creation.
///
/// Re-derives the patron's feature level before delegating, since the level
/// cached at login goes stale when a pledge changes.
pub struct CreateFeedHandler {
    resolver: Arc<FeatureLevelResolver>,
    feed_service: Arc<dyn FeedService>,
}

impl CreateFeedHandler {
    pub fn new(resolver: Arc<FeatureLevelResolver>, feed_service: Arc<dyn FeedService>) -> Self {
        Self {
            resolver,
            feed_service,
        }
    }

    pub async fn handle(&self, cmd: CreateFeedCommand) -> Result<FeedId, DomainError> {
        if cmd.request.url.trim().is_empty() {
            return Err(DomainError::validation("url", "Feed URL is required"));
        }

        let level = self.resolver.by_patron_id(&cmd.identity.user_id).await;
        if level != cmd.identity.feature_level {
            tracing::info!(
                patron_id = %cmd.identity.user_id,
                cached = %cmd.identity.feature_level,
                current = %level,
                "Session feature level is stale"
            );
        }

        let identity = cmd.identity.with_feature_level(level);
        let feed_id = self
            .feed_service
            .create_feed(&cmd.request, &identity)
            .await?;

        tracing::info!(patron_id = %identity.user_id, feed_id = %feed_id, "Feed created");
        Ok(feed_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::feed::InMemoryFeedService;
    use crate::adapters::memory::InMemoryPledgeRoster;
    use crate::domain::foundation::{ErrorCode, PatronId, PledgeId};
    use crate::domain::patronage::{FeatureLevel, TierTable};

    fn identity(level: u8) -> Identity {
        Identity {
            user_id: PatronId::new("42").unwrap(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            profile_url: "https://www.patreon.com/ada".to_string(),
            feature_level: FeatureLevel::new(level),
        }
    }

    fn request() -> FeedRequest {
        FeedRequest {
            url: "https://youtube.com/user/example".to_string(),
            page_size: Some(150),
            quality: None,
            format: None,
        }
    }

    async fn handler(pledge_cents: Option<i64>) -> (CreateFeedHandler, InMemoryFeedService) {
        let roster = InMemoryPledgeRoster::new();
        if let Some(amount) = pledge_cents {
            roster
                .insert(
                    PledgeId::new("pledge-1").unwrap(),
                    PatronId::new("42").unwrap(),
                    amount,
                )
                .await;
        }
        let resolver = Arc::new(FeatureLevelResolver::new(
            Arc::new(roster),
            TierTable::default(),
        ));
        let feeds = InMemoryFeedService::new();
        (
            CreateFeedHandler::new(resolver, Arc::new(feeds.clone())),
            feeds,
        )
    }

    #[tokio::test]
    async fn stale_cached_level_is_replaced_before_delegating() {
        let (handler, feeds) = handler(None).await;

        let feed_id = handler
            .handle(CreateFeedCommand {
                request: request(),
                identity: identity(2),
            })
            .await
            .unwrap();

        assert_eq!(feed_id.as_str(), "feed-1");
        let created = feeds.created().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1.feature_level, FeatureLevel::DEFAULT);
    }

    #[tokio::test]
    async fn upgraded_pledge_is_honored() {
        let (handler, feeds) = handler(Some(300)).await;

        handler
            .handle(CreateFeedCommand {
                request: request(),
                identity: identity(0),
            })
            .await
            .unwrap();

        assert_eq!(feeds.created().await[0].1.feature_level, FeatureLevel::new(2));
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let (handler, feeds) = handler(Some(300)).await;
        let mut req = request();
        req.url = "  ".to_string();

        let err = handler
            .handle(CreateFeedCommand {
                request: req,
                identity: identity(2),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(feeds.created().await.is_empty());
    }
}
