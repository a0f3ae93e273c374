//! Mock OAuth provider for testing.
//!
//! Maps authorization codes to profiles. Unknown codes are rejected the way
//! Patreon rejects them, with a validation error.
//!
//! ```ignore
//! let provider = MockOAuthProvider::new().with_login("good-code", profile);
//! let token = provider.exchange_code("good-code").await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PatronId};
use crate::ports::{AccessToken, OAuthProvider, ProviderProfile};

const TOKEN_PREFIX: &str = "mock-token-";

#[derive(Debug, Default)]
pub struct MockOAuthProvider {
    profiles: HashMap<String, ProviderProfile>,
    fail_profile: bool,
    exchange_calls: AtomicU32,
}

impl MockOAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `code` and resolves it to `profile`.
    pub fn with_login(mut self, code: impl Into<String>, profile: ProviderProfile) -> Self {
        self.profiles.insert(code.into(), profile);
        self
    }

    /// Accepts `code` for a patron with generated profile details.
    pub fn with_patron(self, code: impl Into<String>, patron_id: PatronId) -> Self {
        let profile = ProviderProfile {
            full_name: format!("Patron {}", patron_id),
            email: format!("{}@patrons.example.com", patron_id),
            profile_url: format!("https://www.patreon.com/user?u={}", patron_id),
            patron_id,
        };
        self.with_login(code, profile)
    }

    /// Makes every profile fetch fail with a provider error.
    pub fn with_profile_failure(mut self) -> Self {
        self.fail_profile = true;
        self
    }

    /// Number of code exchanges attempted.
    pub fn exchange_count(&self) -> u32 {
        self.exchange_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, DomainError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);

        if self.profiles.contains_key(code) {
            Ok(AccessToken::new(format!("{}{}", TOKEN_PREFIX, code)))
        } else {
            Err(DomainError::validation("code", "Authorization code rejected"))
        }
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProviderProfile, DomainError> {
        if self.fail_profile {
            return Err(DomainError::new(
                ErrorCode::ProviderError,
                "Identity endpoint unavailable",
            ));
        }

        token
            .expose()
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|code| self.profiles.get(code))
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::ProviderError, "Unknown access token"))
    }
}
