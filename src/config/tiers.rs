//! Feature tier configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::PatronId;
use crate::domain::patronage::TierTable;

/// Pledge thresholds and the campaign owner
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TiersConfig {
    /// Comma-separated `amount_cents:level` pairs, e.g. `100:1,300:2`
    pub thresholds: Option<String>,

    /// Patreon user id that always resolves to the top level
    pub creator_id: Option<String>,
}

impl TiersConfig {
    /// Build the threshold table, falling back to the default table
    pub fn table(&self) -> Result<TierTable, ValidationError> {
        match self.thresholds.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                TierTable::parse(raw).map_err(|e| ValidationError::InvalidTierTable(e.to_string()))
            }
            _ => Ok(TierTable::default()),
        }
    }

    pub fn creator(&self) -> Option<PatronId> {
        self.creator_id
            .as_deref()
            .and_then(|id| PatronId::new(id).ok())
    }

    /// Validate tier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.table()?;
        Ok(())
    }
}
