//! In-memory feed service.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, FeedId};
use crate::domain::identity::Identity;
use crate::ports::{FeedRequest, FeedService};

/// Records every request and hands out sequential ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedService {
    created: Arc<RwLock<Vec<(FeedRequest, Identity)>>>,
}

impl InMemoryFeedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, with the identity each was made for.
    pub async fn created(&self) -> Vec<(FeedRequest, Identity)> {
        self.created.read().await.clone()
    }
}

#[async_trait]
impl FeedService for InMemoryFeedService {
    async fn create_feed(
        &self,
        request: &FeedRequest,
        identity: &Identity,
    ) -> Result<FeedId, DomainError> {
        let mut created = self.created.write().await;
        created.push((request.clone(), identity.clone()));
        FeedId::new(format!("feed-{}", created.len())).map_err(DomainError::from)
    }
}
