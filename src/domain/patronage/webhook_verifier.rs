//! Patreon webhook signature verification.
//!
//! Patreon signs each delivery with an HMAC-MD5 of the exact request body
//! and sends the hex digest in `X-Patreon-Signature`. The body must reach this
//! module untouched; re-encoding it first invalidates every signature.

use hmac::{Hmac, Mac};
use md5::Md5;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

type HmacMd5 = Hmac<Md5>;

/// Verifier for Patreon webhook signatures.
pub struct WebhookSignatureVerifier {
    secret: SecretString,
}

impl WebhookSignatureVerifier {
    /// Creates a verifier for the given shared secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Checks `signature_header` against the HMAC of `payload`.
    ///
    /// Returns `Ok(false)` for a missing, non-hex, or mismatched signature.
    ///
    /// # Errors
    ///
    /// - `SecretNotConfigured` - the shared secret is empty
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<bool, WebhookError> {
        let expected = compute_signature(self.secret.expose_secret(), payload)?;

        let provided = match signature_header.map(str::trim) {
            Some(header) if !header.is_empty() => header,
            _ => return Ok(false),
        };

        let provided = match hex::decode(provided) {
            Ok(bytes) => bytes,
            Err(_) => return Ok(false),
        };

        Ok(constant_time_compare(&expected, &provided))
    }

    /// Signs `payload` with the configured secret, hex encoded.
    pub fn sign(&self, payload: &[u8]) -> Result<String, WebhookError> {
        sign(self.secret.expose_secret(), payload)
    }
}

impl std::fmt::Debug for WebhookSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Computes the hex signature Patreon would send for `payload`.
pub fn sign(secret: &str, payload: &[u8]) -> Result<String, WebhookError> {
    compute_signature(secret, payload).map(hex::encode)
}

fn compute_signature(secret: &str, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::SecretNotConfigured);
    }

    let mut mac = HmacMd5::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::SecretNotConfigured)?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "patreon_webhook_secret_12345";
    const PAYLOAD: &str = r#"{"data":{"id":"pledge-1","attributes":{"amount_cents":300},"relationships":{"patron":{"data":{"id":"42"}}}}}"#;

    fn verifier() -> WebhookSignatureVerifier {
        WebhookSignatureVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let signature = sign(TEST_SECRET, PAYLOAD.as_bytes()).unwrap();

        let result = verifier().verify(PAYLOAD.as_bytes(), Some(&signature));

        assert!(result.unwrap());
    }

    #[test]
    fn verify_matches_known_hmac_md5_digest() {
        // RFC 2104 test vector
        let verifier = WebhookSignatureVerifier::new(SecretString::new("Jefe".to_string()));

        let result = verifier.verify(
            b"what do ya want for nothing?",
            Some("750c783e6ab0b503eaa86e310a5db738"),
        );

        assert!(result.unwrap());
    }

    #[test]
    fn sign_produces_known_hmac_md5_digest() {
        let signature = sign("Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(signature, "750c783e6ab0b503eaa86e310a5db738");
    }

    #[test]
    fn sha256_signature_is_rejected() {
        let sha256_length = "a".repeat(64);
        assert!(!verifier()
            .verify(PAYLOAD.as_bytes(), Some(&sha256_length))
            .unwrap());
    }

    #[test]
    fn verify_accepts_uppercase_hex() {
        let signature = sign(TEST_SECRET, PAYLOAD.as_bytes())
            .unwrap()
            .to_uppercase();

        assert!(verifier()
            .verify(PAYLOAD.as_bytes(), Some(&signature))
            .unwrap());
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let signature = sign("wrong_secret", PAYLOAD.as_bytes()).unwrap();

        assert!(!verifier()
            .verify(PAYLOAD.as_bytes(), Some(&signature))
            .unwrap());
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let signature = sign(TEST_SECRET, PAYLOAD.as_bytes()).unwrap();
        let tampered = PAYLOAD.replace("300", "30000");

        assert!(!verifier()
            .verify(tampered.as_bytes(), Some(&signature))
            .unwrap());
    }

    #[test]
    fn verify_reformatted_payload_fails() {
        let signature = sign(TEST_SECRET, PAYLOAD.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        let pretty = serde_json::to_string_pretty(&value).unwrap();

        assert!(!verifier()
            .verify(pretty.as_bytes(), Some(&signature))
            .unwrap());
    }

    // ══════════════════════════════════════════════════════════════
    // Malformed Header Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_header_is_false_not_error() {
        assert!(!verifier().verify(PAYLOAD.as_bytes(), None).unwrap());
    }

    #[test]
    fn empty_header_is_false() {
        assert!(!verifier().verify(PAYLOAD.as_bytes(), Some("  ")).unwrap());
    }

    #[test]
    fn non_hex_header_is_false() {
        assert!(!verifier()
            .verify(PAYLOAD.as_bytes(), Some("not_valid_hex"))
            .unwrap());
    }

    #[test]
    fn truncated_header_is_false() {
        let signature = sign(TEST_SECRET, PAYLOAD.as_bytes()).unwrap();

        assert!(!verifier()
            .verify(PAYLOAD.as_bytes(), Some(&signature[..16]))
            .unwrap());
    }

    #[test]
    fn empty_secret_is_an_error() {
        let verifier = WebhookSignatureVerifier::new(SecretString::new(String::new()));

        let result = verifier.verify(PAYLOAD.as_bytes(), Some("abcd"));

        assert!(matches!(result, Err(WebhookError::SecretNotConfigured)));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let output = format!("{:?}", verifier());
        assert!(!output.contains(TEST_SECRET));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn signed_body_always_verifies(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            secret in "[a-zA-Z0-9]{1,64}",
        ) {
            let verifier = WebhookSignatureVerifier::new(SecretString::new(secret.clone()));
            let signature = sign(&secret, &body).unwrap();
            prop_assert!(verifier.verify(&body, Some(&signature)).unwrap());
        }

        #[test]
        fn mutated_body_never_verifies(
            body in proptest::collection::vec(any::<u8>(), 1..512),
            index in any::<proptest::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let signature = sign(TEST_SECRET, &body).unwrap();
            let mut mutated = body.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= flip;

            prop_assert!(!verifier().verify(&mutated, Some(&signature)).unwrap());
        }

        #[test]
        fn mutated_signature_never_verifies(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            index in any::<proptest::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut raw = hex::decode(sign(TEST_SECRET, &body).unwrap()).unwrap();
            let i = index.index(raw.len());
            raw[i] ^= flip;
            let signature = hex::encode(raw);

            prop_assert!(!verifier().verify(&body, Some(&signature)).unwrap());
        }
    }
}
