//! Authenticating payment webhooks with the shared signing secret.
//!
//! The `Stripe-Signature` header carries a timestamp and one or more
//! HMAC-SHA256 signatures over `"{timestamp}.{raw body}"`. The body must be
//! verified byte-for-byte before it is parsed.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;
use super::stripe_event::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    /// Every `v1` signature present; secret rotation can produce several.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses `t=<timestamp>,v1=<hex>[,v1=<hex>][,v0=...]`.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::MalformedHeader("invalid header format".into()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".into())
                    })?);
                }
                "v1" => {
                    v1_signatures.push(hex::decode(value).map_err(|_| {
                        WebhookError::MalformedHeader("invalid v1 signature hex".into())
                    })?);
                }
                // v0 and future schemes are ignored
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".into()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::MalformedHeader("missing v1 signature".into()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
#[derive(Clone)]
pub struct StripeWebhookVerifier {
    secret: SecretString,
}

impl StripeWebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies the signature against the current time, then parses the event.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        self.verify_and_parse_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Same as [`verify_and_parse`](Self::verify_and_parse) with an explicit clock.
    pub fn verify_and_parse_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        validate_timestamp(header.timestamp, now)?;

        let expected = self.compute_signature(header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn validate_timestamp(timestamp: i64, now: i64) -> Result<(), WebhookError> {
    let age = now - timestamp;
    if age > MAX_EVENT_AGE_SECS {
        return Err(WebhookError::TimestampOutOfRange);
    }
    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(WebhookError::TimestampInFuture);
    }
    Ok(())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Produces a `Stripe-Signature` header value for `payload`, as the
/// processor would. Used by tests and local tooling.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return format!("t={}", timestamp),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SIGNING_SECRET: &str = "whsec_course_market";
    const NOW: i64 = 1_704_067_200;

    fn payload() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": NOW,
            "data": { "object": { "id": "cs_1" } }
        }))
        .unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Header parsing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1_only() {
        let header = SignatureHeader::parse(&format!("t=1234567890,v1={}", "a".repeat(64))).unwrap();
        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
    }

    #[test]
    fn parse_header_collects_multiple_v1() {
        let header = SignatureHeader::parse(&format!(
            "t=1,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        ))
        .unwrap();
        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_missing_parts_fails() {
        assert!(SignatureHeader::parse("t=1").is_err());
        assert!(SignatureHeader::parse(&format!("v1={}", "a".repeat(64))).is_err());
        assert!(SignatureHeader::parse("").is_err());
        assert!(SignatureHeader::parse("t=abc,v1=00").is_err());
        assert!(SignatureHeader::parse("t=1,v1=zz").is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_signature_parses_event() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = payload();
        let header = sign_payload(SIGNING_SECRET, NOW, &body);

        let event = verifier.verify_and_parse_at(&body, &header, NOW).unwrap();
        assert_eq!(event.id, "evt_1");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = payload();
        let header = sign_payload("whsec_other", NOW, &body);

        assert!(matches!(
            verifier.verify_and_parse_at(&body, &header, NOW),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = payload();
        let header = sign_payload(SIGNING_SECRET, NOW, &body);
        let mut tampered = body.clone();
        tampered.push(b' ');

        assert!(matches!(
            verifier.verify_and_parse_at(&tampered, &header, NOW),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn stale_event_is_rejected() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = payload();
        let signed_at = NOW - MAX_EVENT_AGE_SECS - 1;
        let header = sign_payload(SIGNING_SECRET, signed_at, &body);

        assert!(matches!(
            verifier.verify_and_parse_at(&body, &header, NOW),
            Err(WebhookError::TimestampOutOfRange)
        ));
    }

    #[test]
    fn future_event_beyond_skew_is_rejected() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = payload();
        let header = sign_payload(SIGNING_SECRET, NOW + MAX_CLOCK_SKEW_SECS + 1, &body);

        assert!(matches!(
            verifier.verify_and_parse_at(&body, &header, NOW),
            Err(WebhookError::TimestampInFuture)
        ));
    }

    #[test]
    fn signed_garbage_is_a_payload_error() {
        let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
        let body = b"not json".to_vec();
        let header = sign_payload(SIGNING_SECRET, NOW, &body);

        assert!(matches!(
            verifier.verify_and_parse_at(&body, &header, NOW),
            Err(WebhookError::MalformedPayload(_))
        ));
    }

    proptest! {
        #[test]
        fn any_other_secret_fails(secret in "[a-z0-9_]{8,40}") {
            prop_assume!(secret != SIGNING_SECRET);
            let verifier = StripeWebhookVerifier::new(SIGNING_SECRET);
            let body = payload();
            let header = sign_payload(&secret, NOW, &body);
            prop_assert!(verifier.verify_and_parse_at(&body, &header, NOW).is_err());
        }
    }
}
