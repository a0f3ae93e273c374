//! Feed service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Location of the external feed generator
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the feed service; unset runs an in-process stand-in
    pub base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate feed configuration
    ///
    /// Production deployments must point at a real feed service.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match self.base_url.as_deref() {
            Some(url) => {
                reqwest::Url::parse(url).map_err(|_| ValidationError::InvalidUrl("feed.base_url"))?;
            }
            None if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("FEED__BASE_URL"));
            }
            None => {}
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("feed.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_base_url_allowed_in_development() {
        assert!(FeedConfig::default()
            .validate(&Environment::Development)
            .is_ok());
    }

    #[test]
    fn test_missing_base_url_rejected_in_production() {
        assert!(FeedConfig::default()
            .validate(&Environment::Production)
            .is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FeedConfig {
            base_url: Some("::".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }
}
