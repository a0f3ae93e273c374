//! CSRF state tokens for the OAuth round trip.
//!
//! A token is minted when login starts, stored in the session, and echoed
//! back by Patreon on the callback. It is compared in constant time and
//! consumed on the first callback that presents it.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 32;

/// Anti-forgery token for a single login attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateToken(String);

impl StateToken {
    /// Generates a fresh token from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps a token read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against the value returned by the provider in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected.ct_eq(candidate).into()
    }
}

// Tokens are bearer secrets during the exchange window.
impl std::fmt::Debug for StateToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StateToken([REDACTED])")
    }
}
