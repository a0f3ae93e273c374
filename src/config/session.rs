//! Session cookie configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Browser session cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Overrides the environment default for the `Secure` attribute
    pub secure_cookie: Option<bool>,

    /// Upper bound on live session records; the oldest are evicted past it
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl SessionConfig {
    /// `Secure` is on in production unless explicitly disabled
    pub fn secure(&self, environment: &Environment) -> bool {
        self.secure_cookie
            .unwrap_or(*environment == Environment::Production)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__COOKIE_NAME"));
        }
        if self.max_sessions == 0 {
            return Err(ValidationError::InvalidSessionCapacity);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: None,
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_cookie_name() -> String {
    "patron_sync".to_string()
}

fn default_max_sessions() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_follows_environment() {
        let config = SessionConfig::default();
        assert!(config.secure(&Environment::Production));
        assert!(!config.secure(&Environment::Development));
    }

    #[test]
    fn test_explicit_override() {
        let config = SessionConfig {
            secure_cookie: Some(true),
            ..Default::default()
        };
        assert!(config.secure(&Environment::Development));
    }

    #[test]
    fn test_default_is_bounded_and_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.max_sessions, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let config = SessionConfig {
            max_sessions: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionCapacity)
        ));
    }

    #[test]
    fn test_blank_cookie_name_is_rejected() {
        let config = SessionConfig {
            cookie_name: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
