//! Feature level definitions.
//!
//! A feature level is the discrete privilege rank a patron unlocks with their
//! pledge. Levels are plain ordered integers so the threshold table can be
//! configured without code changes.

use serde::{Deserialize, Serialize};

/// Ordered feature tier.
///
/// `FeatureLevel::DEFAULT` is what anonymous users, unknown patrons, and
/// deleted pledges resolve to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeatureLevel(u8);

impl FeatureLevel {
    /// Lowest tier, granted to everyone.
    pub const DEFAULT: FeatureLevel = FeatureLevel(0);

    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Returns the numeric rank of this level.
    pub fn rank(&self) -> u8 {
        self.0
    }

    /// Returns true if this level unlocks anything beyond the default tier.
    pub fn is_elevated(&self) -> bool {
        *self > Self::DEFAULT
    }
}

impl From<u8> for FeatureLevel {
    fn from(level: u8) -> Self {
        Self(level)
    }
}

impl std::fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
