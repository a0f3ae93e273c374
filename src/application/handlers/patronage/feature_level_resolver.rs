//! FeatureLevelResolver - Maps patrons and pledge amounts to feature levels.

use std::sync::Arc;

use crate::domain::foundation::PatronId;
use crate::domain::patronage::{FeatureLevel, TierTable};
use crate::ports::PatronRoster;

/// Resolves the feature level a patron is entitled to right now.
///
/// Never fails: unknown patrons and roster outages resolve to the default
/// level.
pub struct FeatureLevelResolver {
    roster: Arc<dyn PatronRoster>,
    tiers: TierTable,
    creator_id: Option<PatronId>,
}

impl FeatureLevelResolver {
    pub fn new(roster: Arc<dyn PatronRoster>, tiers: TierTable) -> Self {
        Self {
            roster,
            tiers,
            creator_id: None,
        }
    }

    /// The campaign owner always resolves to the top level.
    pub fn with_creator(mut self, creator_id: PatronId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Highest level whose threshold is at or below `amount_cents`.
    pub fn by_amount(&self, amount_cents: i64) -> FeatureLevel {
        self.tiers.by_amount(amount_cents)
    }

    /// Looks up the patron's current pledge and maps it through the tiers.
    pub async fn by_patron_id(&self, patron_id: &PatronId) -> FeatureLevel {
        if self.creator_id.as_ref() == Some(patron_id) {
            return self.tiers.top_level();
        }

        match self.roster.pledge_amount(patron_id).await {
            Ok(Some(amount_cents)) => self.by_amount(amount_cents),
            Ok(None) => FeatureLevel::DEFAULT,
            Err(err) => {
                tracing::warn!(
                    patron_id = %patron_id,
                    error = %err,
                    "Roster lookup failed, using default feature level"
                );
                FeatureLevel::DEFAULT
            }
        }
    }

    pub fn default_level(&self) -> FeatureLevel {
        FeatureLevel::DEFAULT
    }
}
