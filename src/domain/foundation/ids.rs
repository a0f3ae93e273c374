//! Strongly-typed identifier value objects.
//!
//! Patreon hands out opaque string identifiers for users and pledges, so both
//! are thin newtypes over `String` that only reject empty values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Patreon user identifier of a patron (also the logged-in user's id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatronId(String);

impl PatronId {
    /// Creates a new PatronId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("patron_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Patreon pledge identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PledgeId(String);

impl PledgeId {
    /// Creates a new PledgeId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("pledge_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PledgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a feed created by the feed-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedId(String);

impl FeedId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("feed_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patron_id_accepts_non_empty_string() {
        let id = PatronId::new("2822191").unwrap();
        assert_eq!(id.as_str(), "2822191");
    }

    #[test]
    fn patron_id_rejects_empty_string() {
        let result = PatronId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "patron_id"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn patron_id_rejects_whitespace() {
        assert!(PatronId::new("   ").is_err());
    }

    #[test]
    fn pledge_id_displays_correctly() {
        let id = PledgeId::new("pledge-456").unwrap();
        assert_eq!(format!("{}", id), "pledge-456");
    }

    #[test]
    fn pledge_id_rejects_empty_string() {
        assert!(PledgeId::new("").is_err());
    }

    #[test]
    fn feed_id_serializes_transparently() {
        let id = FeedId::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
