//! WebhookEventProcessor - Verifies and applies Patreon pledge webhooks.
//!
//! | Event             | Bookkeeping | Entitlement                 |
//! |-------------------|-------------|-----------------------------|
//! | `pledges:create`  | yes         | unchanged                   |
//! | `pledges:update`  | yes         | set to `by_amount(amount)`  |
//! | `pledges:delete`  | yes         | set to default level        |
//! | anything else     | yes         | unchanged                   |
//!
//! Only signature failures are reported to the caller. Once a delivery is
//! authenticated, every downstream failure is logged and acknowledged.

use std::sync::Arc;

use super::FeatureLevelResolver;
use crate::domain::foundation::{PatronId, PledgeId};
use crate::domain::patronage::{
    FeatureLevel, PledgeEvent, PledgeEventType, WebhookError, WebhookSignatureVerifier,
};
use crate::ports::{EntitlementStore, PledgeBookkeeper};

/// Command to process a webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessPledgeWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `X-Patreon-Signature` header value.
    pub signature: Option<String>,
    /// `X-Patreon-Event` header value.
    pub event: Option<String>,
}

/// Result of an authenticated delivery.
#[derive(Debug)]
pub enum ProcessPledgeWebhookResult {
    /// Bookkeeping ran; this event type does not touch entitlements.
    Recorded {
        pledge_id: PledgeId,
        event_type: PledgeEventType,
    },
    /// Bookkeeping ran and the patron's level was written.
    EntitlementUpdated {
        patron_id: PatronId,
        level: FeatureLevel,
    },
    /// Authenticated, but some processing failed. Logged, not retried.
    Acknowledged { failures: Vec<WebhookError> },
}

/// Handler for Patreon pledge webhooks.
pub struct WebhookEventProcessor {
    verifier: WebhookSignatureVerifier,
    resolver: Arc<FeatureLevelResolver>,
    bookkeeper: Arc<dyn PledgeBookkeeper>,
    entitlements: Arc<dyn EntitlementStore>,
}

impl WebhookEventProcessor {
    pub fn new(
        verifier: WebhookSignatureVerifier,
        resolver: Arc<FeatureLevelResolver>,
        bookkeeper: Arc<dyn PledgeBookkeeper>,
        entitlements: Arc<dyn EntitlementStore>,
    ) -> Self {
        Self {
            verifier,
            resolver,
            bookkeeper,
            entitlements,
        }
    }

    /// Verifies the delivery and applies it.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` / `InvalidSignature` - not from Patreon
    /// - `SecretNotConfigured` - verification could not run
    ///
    /// No other error is ever returned.
    pub async fn handle(
        &self,
        cmd: ProcessPledgeWebhookCommand,
    ) -> Result<ProcessPledgeWebhookResult, WebhookError> {
        // 1. Authenticate the untouched body
        let signature = cmd.signature.as_deref().ok_or_else(|| {
            tracing::warn!("Webhook delivery without signature header");
            WebhookError::MissingSignature
        })?;

        if !self.verifier.verify(&cmd.payload, Some(signature))? {
            tracing::warn!("Webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        // 2. Parse; malformed bodies are acknowledged
        let event_type = PledgeEventType::from_header(cmd.event.as_deref().unwrap_or_default());
        let event = match PledgeEvent::parse(&cmd.payload, event_type.clone()) {
            Ok(event) => event,
            Err(err) => {
                tracing::error!(event = %event_type, error = %err, "Failed to parse pledge webhook");
                return Ok(ProcessPledgeWebhookResult::Acknowledged {
                    failures: vec![err],
                });
            }
        };

        // 3. Dispatch
        Ok(self.apply(event).await)
    }

    async fn apply(&self, event: PledgeEvent) -> ProcessPledgeWebhookResult {
        let mut failures = Vec::new();

        if let Err(err) = self.bookkeeper.record(&event).await {
            tracing::error!(
                patron_id = %event.patron_id,
                pledge_id = %event.pledge_id,
                event = %event.event_type,
                error = %err,
                "Pledge bookkeeping failed"
            );
            failures.push(WebhookError::Bookkeeping(err.to_string()));
        }

        let target = match event.event_type {
            PledgeEventType::Updated => Some(self.resolver.by_amount(event.amount_cents)),
            PledgeEventType::Deleted => Some(self.resolver.default_level()),
            PledgeEventType::Created | PledgeEventType::Other(_) => None,
        };

        let mut updated = None;
        if let Some(level) = target {
            match self.entitlements.downgrade(&event.patron_id, level).await {
                Ok(()) => updated = Some(level),
                Err(err) => {
                    tracing::error!(
                        patron_id = %event.patron_id,
                        pledge_id = %event.pledge_id,
                        event = %event.event_type,
                        level = %level,
                        error = %err,
                        "Failed to update entitlement"
                    );
                    failures.push(WebhookError::Entitlement(err.to_string()));
                }
            }
        }

        if !failures.is_empty() {
            return ProcessPledgeWebhookResult::Acknowledged { failures };
        }

        tracing::info!(
            patron_id = %event.patron_id,
            pledge_id = %event.pledge_id,
            event = %event.event_type,
            "Processed Patreon pledge event"
        );

        match updated {
            Some(level) => ProcessPledgeWebhookResult::EntitlementUpdated {
                patron_id: event.patron_id,
                level,
            },
            None => ProcessPledgeWebhookResult::Recorded {
                pledge_id: event.pledge_id,
                event_type: event.event_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEntitlementStore, InMemoryPledgeRoster};
    use crate::domain::patronage::{sign, TierTable};
    use secrecy::SecretString;

    const SECRET: &str = "patreon_webhook_secret";

    struct Harness {
        processor: WebhookEventProcessor,
        roster: InMemoryPledgeRoster,
        entitlements: InMemoryEntitlementStore,
    }

    fn harness() -> Harness {
        let roster = InMemoryPledgeRoster::new();
        let entitlements = InMemoryEntitlementStore::new();
        let resolver = Arc::new(FeatureLevelResolver::new(
            Arc::new(roster.clone()),
            TierTable::default(),
        ));
        let processor = WebhookEventProcessor::new(
            WebhookSignatureVerifier::new(SecretString::new(SECRET.to_string())),
            resolver,
            Arc::new(roster.clone()),
            Arc::new(entitlements.clone()),
        );
        Harness {
            processor,
            roster,
            entitlements,
        }
    }

    fn body(patron: &str, amount: i64) -> Vec<u8> {
        serde_json::json!({
            "data": {
                "id": format!("pledge-{}", patron),
                "type": "pledge",
                "attributes": { "amount_cents": amount },
                "relationships": { "patron": { "data": { "id": patron, "type": "user" } } }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn signed(payload: Vec<u8>, event: &str) -> ProcessPledgeWebhookCommand {
        let signature = sign(SECRET, &payload).unwrap();
        ProcessPledgeWebhookCommand {
            payload,
            signature: Some(signature),
            event: Some(event.to_string()),
        }
    }

    fn patron(id: &str) -> PatronId {
        PatronId::new(id).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Authentication Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let h = harness();
        let cmd = ProcessPledgeWebhookCommand {
            payload: body("42", 300),
            signature: None,
            event: Some("pledges:update".to_string()),
        };

        let result = h.processor.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
        assert_eq!(h.entitlements.write_count(), 0);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_without_side_effects() {
        let h = harness();
        let mut cmd = signed(body("42", 300), "pledges:update");
        cmd.signature = Some("00".repeat(32));

        let result = h.processor.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        assert_eq!(h.roster.pledge_count().await, 0);
        assert_eq!(h.entitlements.write_count(), 0);
    }

    #[tokio::test]
    async fn body_signed_with_other_secret_is_rejected() {
        let h = harness();
        let payload = body("42", 300);
        let cmd = ProcessPledgeWebhookCommand {
            signature: Some(sign("other-secret", &payload).unwrap()),
            payload,
            event: Some("pledges:delete".to_string()),
        };

        assert!(matches!(
            h.processor.handle(cmd).await,
            Err(WebhookError::InvalidSignature)
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Dispatch Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn created_records_pledge_only() {
        let h = harness();

        let result = h
            .processor
            .handle(signed(body("42", 300), "pledges:create"))
            .await
            .unwrap();

        assert!(matches!(result, ProcessPledgeWebhookResult::Recorded { .. }));
        assert_eq!(h.roster.pledge_count().await, 1);
        assert_eq!(h.entitlements.write_count(), 0);
    }

    #[tokio::test]
    async fn updated_at_tier_two_threshold_sets_tier_two() {
        let h = harness();

        let result = h
            .processor
            .handle(signed(body("42", 300), "pledges:update"))
            .await
            .unwrap();

        assert!(matches!(
            result,
            ProcessPledgeWebhookResult::EntitlementUpdated { level, .. } if level == FeatureLevel::new(2)
        ));
        assert_eq!(
            h.entitlements.level_of(&patron("42")).await.unwrap(),
            Some(FeatureLevel::new(2))
        );
    }

    #[tokio::test]
    async fn updated_below_first_threshold_sets_default() {
        let h = harness();
        h.entitlements.set(patron("42"), FeatureLevel::new(2)).await;

        h.processor
            .handle(signed(body("42", 50), "pledges:update"))
            .await
            .unwrap();

        assert_eq!(
            h.entitlements.level_of(&patron("42")).await.unwrap(),
            Some(FeatureLevel::DEFAULT)
        );
    }

    #[tokio::test]
    async fn deleted_always_sets_default_level() {
        for prior in [0u8, 1, 2] {
            let h = harness();
            h.entitlements.set(patron("42"), FeatureLevel::new(prior)).await;

            h.processor
                .handle(signed(body("42", 300), "pledges:delete"))
                .await
                .unwrap();

            assert_eq!(
                h.entitlements.level_of(&patron("42")).await.unwrap(),
                Some(FeatureLevel::DEFAULT),
                "prior level {}",
                prior
            );
        }
    }

    #[tokio::test]
    async fn deleted_removes_pledge_from_roster() {
        let h = harness();
        h.processor
            .handle(signed(body("42", 300), "pledges:create"))
            .await
            .unwrap();

        h.processor
            .handle(signed(body("42", 300), "pledges:delete"))
            .await
            .unwrap();

        assert_eq!(h.roster.pledge_count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_delivery_is_idempotent() {
        let h = harness();
        let cmd = signed(body("42", 100), "pledges:update");

        h.processor.handle(cmd.clone()).await.unwrap();
        h.processor.handle(cmd).await.unwrap();

        assert_eq!(
            h.entitlements.level_of(&patron("42")).await.unwrap(),
            Some(FeatureLevel::new(1))
        );
        assert_eq!(h.roster.pledge_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_event_is_bookkeeping_only() {
        let h = harness();

        let result = h
            .processor
            .handle(signed(body("42", 300), "members:create"))
            .await
            .unwrap();

        assert!(matches!(result, ProcessPledgeWebhookResult::Recorded { .. }));
        assert_eq!(h.entitlements.write_count(), 0);
    }

    #[tokio::test]
    async fn missing_event_header_is_bookkeeping_only() {
        let h = harness();
        let mut cmd = signed(body("42", 300), "");
        cmd.event = None;

        let result = h.processor.handle(cmd).await.unwrap();

        assert!(matches!(result, ProcessPledgeWebhookResult::Recorded { .. }));
        assert_eq!(h.entitlements.write_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Policy Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn malformed_body_is_acknowledged() {
        let h = harness();

        let result = h
            .processor
            .handle(signed(b"{not json".to_vec(), "pledges:update"))
            .await
            .unwrap();

        assert!(matches!(
            result,
            ProcessPledgeWebhookResult::Acknowledged { ref failures }
                if matches!(failures.as_slice(), [WebhookError::Malformed(_)])
        ));
        assert_eq!(h.entitlements.write_count(), 0);
    }

    #[tokio::test]
    async fn bookkeeping_failure_is_acknowledged_and_downgrade_still_applies() {
        let h = harness();
        h.roster.set_failing(true);

        let result = h
            .processor
            .handle(signed(body("42", 300), "pledges:delete"))
            .await
            .unwrap();

        assert!(matches!(
            result,
            ProcessPledgeWebhookResult::Acknowledged { ref failures }
                if matches!(failures.as_slice(), [WebhookError::Bookkeeping(_)])
        ));
        assert_eq!(
            h.entitlements.level_of(&patron("42")).await.unwrap(),
            Some(FeatureLevel::DEFAULT)
        );
    }

    #[tokio::test]
    async fn store_failure_is_acknowledged() {
        let h = harness();
        h.entitlements.set_failing(true);

        let result = h
            .processor
            .handle(signed(body("42", 300), "pledges:update"))
            .await;

        assert!(matches!(
            result,
            Ok(ProcessPledgeWebhookResult::Acknowledged { ref failures })
                if matches!(failures.as_slice(), [WebhookError::Entitlement(_)])
        ));
    }
}
