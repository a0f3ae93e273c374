//! Pledge amount to feature level mapping.
//!
//! Defines which feature level a pledge amount unlocks.

use serde::{Deserialize, Serialize};

use super::FeatureLevel;
use crate::domain::foundation::ValidationError;

/// A single row of the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    /// Smallest pledge (in cents) that unlocks `level`.
    pub min_amount_cents: i64,
    /// The level unlocked at or above `min_amount_cents`.
    pub level: FeatureLevel,
}

impl TierThreshold {
    pub fn new(min_amount_cents: i64, level: impl Into<FeatureLevel>) -> Self {
        Self {
            min_amount_cents,
            level: level.into(),
        }
    }
}

/// Ordered threshold table.
///
/// Rows are strictly ascending in both amount and level, every threshold is
/// positive, and every level is above the default. Together these make
/// [`TierTable::by_amount`] total and monotonically non-decreasing, with
/// `by_amount(0) == FeatureLevel::DEFAULT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    thresholds: Vec<TierThreshold>,
}

impl TierTable {
    /// Builds a table, rejecting rows that would break monotonicity.
    pub fn new(thresholds: Vec<TierThreshold>) -> Result<Self, ValidationError> {
        for threshold in &thresholds {
            if threshold.min_amount_cents <= 0 {
                return Err(ValidationError::out_of_range(
                    "min_amount_cents",
                    1,
                    i64::MAX,
                    threshold.min_amount_cents,
                ));
            }
            if !threshold.level.is_elevated() {
                return Err(ValidationError::invalid_format(
                    "level",
                    "threshold levels must be above the default level",
                ));
            }
        }

        for pair in thresholds.windows(2) {
            if pair[1].min_amount_cents <= pair[0].min_amount_cents {
                return Err(ValidationError::invalid_format(
                    "min_amount_cents",
                    "thresholds must be strictly ascending",
                ));
            }
            if pair[1].level <= pair[0].level {
                return Err(ValidationError::invalid_format(
                    "level",
                    "levels must be strictly ascending",
                ));
            }
        }

        Ok(Self { thresholds })
    }

    /// Parses a table from `amount:level` pairs separated by commas.
    ///
    /// Example: `"100:1,300:2"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut thresholds = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (amount, level) = entry.split_once(':').ok_or_else(|| {
                ValidationError::invalid_format("tiers", format!("expected amount:level, got '{}'", entry))
            })?;

            let amount: i64 = amount.trim().parse().map_err(|_| {
                ValidationError::invalid_format("tiers", format!("invalid amount '{}'", amount))
            })?;
            let level: u8 = level.trim().parse().map_err(|_| {
                ValidationError::invalid_format("tiers", format!("invalid level '{}'", level))
            })?;

            thresholds.push(TierThreshold::new(amount, level));
        }

        Self::new(thresholds)
    }

    /// Returns the highest level whose threshold is at or below `amount_cents`.
    ///
    /// Amounts below every threshold (including zero and negative amounts)
    /// resolve to the default level.
    pub fn by_amount(&self, amount_cents: i64) -> FeatureLevel {
        self.thresholds
            .iter()
            .rev()
            .find(|t| t.min_amount_cents <= amount_cents)
            .map(|t| t.level)
            .unwrap_or(FeatureLevel::DEFAULT)
    }

    /// The highest configured level, or the default when the table is empty.
    pub fn top_level(&self) -> FeatureLevel {
        self.thresholds
            .last()
            .map(|t| t.level)
            .unwrap_or(FeatureLevel::DEFAULT)
    }

    pub fn thresholds(&self) -> &[TierThreshold] {
        &self.thresholds
    }
}

impl Default for TierTable {
    /// | Pledge | Level |
    /// |--------|-------|
    /// | < $1   | 0     |
    /// | >= $1  | 1     |
    /// | >= $3  | 2     |
    fn default() -> Self {
        Self {
            thresholds: vec![TierThreshold::new(100, 1), TierThreshold::new(300, 2)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Table Construction Tests

    #[test]
    fn default_table_has_two_tiers() {
        let table = TierTable::default();
        assert_eq!(table.thresholds().len(), 2);
        assert_eq!(table.top_level(), FeatureLevel::new(2));
    }

    #[test]
    fn rejects_descending_amounts() {
        let result = TierTable::new(vec![TierThreshold::new(300, 1), TierThreshold::new(100, 2)]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_descending_levels() {
        let result = TierTable::new(vec![TierThreshold::new(100, 2), TierThreshold::new(300, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_threshold() {
        let result = TierTable::new(vec![TierThreshold::new(0, 1)]);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn rejects_default_level_row() {
        let result = TierTable::new(vec![TierThreshold::new(100, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_table_is_allowed() {
        let table = TierTable::new(vec![]).unwrap();
        assert_eq!(table.by_amount(10_000), FeatureLevel::DEFAULT);
        assert_eq!(table.top_level(), FeatureLevel::DEFAULT);
    }

    #[test]
    fn parses_amount_level_pairs() {
        let table = TierTable::parse("100:1, 300:2 ,1000:3").unwrap();
        assert_eq!(table.thresholds().len(), 3);
        assert_eq!(table.top_level(), FeatureLevel::new(3));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TierTable::parse("100-1").is_err());
        assert!(TierTable::parse("abc:1").is_err());
        assert!(TierTable::parse("100:x").is_err());
    }

    // Lookup Tests

    #[test]
    fn zero_amount_is_default_level() {
        assert_eq!(TierTable::default().by_amount(0), FeatureLevel::DEFAULT);
    }

    #[test]
    fn negative_amount_is_default_level() {
        assert_eq!(TierTable::default().by_amount(-500), FeatureLevel::DEFAULT);
    }

    #[test]
    fn just_below_first_threshold_is_default_level() {
        assert_eq!(TierTable::default().by_amount(99), FeatureLevel::DEFAULT);
    }

    #[test]
    fn exact_threshold_unlocks_level() {
        let table = TierTable::default();
        assert_eq!(table.by_amount(100), FeatureLevel::new(1));
        assert_eq!(table.by_amount(300), FeatureLevel::new(2));
    }

    #[test]
    fn above_top_threshold_is_top_level() {
        let table = TierTable::default();
        assert_eq!(table.by_amount(1_000_000), table.top_level());
    }

    proptest! {
        #[test]
        fn by_amount_is_monotonic(a in -10_000i64..100_000, b in -10_000i64..100_000) {
            let table = TierTable::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.by_amount(low) <= table.by_amount(high));
        }

        #[test]
        fn by_amount_never_exceeds_top_level(amount in any::<i64>()) {
            let table = TierTable::default();
            prop_assert!(table.by_amount(amount) <= table.top_level());
        }
    }
}
