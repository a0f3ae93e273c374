//! The logged-in user as cached in the session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PatronId;
use crate::domain::patronage::FeatureLevel;

/// Identity resolved from Patreon at login.
///
/// `feature_level` is a snapshot taken at login. Privileged operations
/// re-derive the level instead of trusting it, since the pledge may have
/// changed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: PatronId,
    pub full_name: String,
    pub email: String,
    pub profile_url: String,
    pub feature_level: FeatureLevel,
}

impl Identity {
    /// Returns a copy carrying a freshly resolved level.
    pub fn with_feature_level(&self, level: FeatureLevel) -> Self {
        Self {
            feature_level: level,
            ..self.clone()
        }
    }
}
