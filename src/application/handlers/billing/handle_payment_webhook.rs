//! HandlePaymentWebhookHandler - Command handler for payment processor callbacks.

use std::sync::Arc;

use crate::domain::billing::{
    BillingError, StripeEvent, StripeEventType, StripeWebhookVerifier, WebhookError,
};
use crate::domain::foundation::{CourseId, ErrorCode, UserId};
use crate::ports::{EnrollOutcome, EnrollmentRepository};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value, if sent.
    pub signature: Option<String>,
}

/// Result of webhook processing. Every variant is acknowledged to the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Payment confirmed, enrollment recorded.
    Enrolled { user_id: UserId, course_id: CourseId },
    /// Redelivery of a payment that already enrolled the buyer.
    AlreadyEnrolled { user_id: UserId, course_id: CourseId },
    /// Session completed but funds are not yet confirmed.
    AwaitingPayment { session_id: String },
    /// Buyer or course no longer exists.
    TargetMissing { user_id: UserId, course_id: CourseId },
    /// Session does not name a usable buyer and course, e.g. one created
    /// outside this service.
    Unroutable { session_id: String, reason: String },
    /// Event type this service does not act on.
    Ignored { event_type: String },
}

/// Handler for processing payment processor webhooks.
///
/// The signature is checked before anything in the body is read. Delivery is
/// at-least-once, so enrollment goes through the idempotent upsert and a
/// replay yields `AlreadyEnrolled` rather than an error.
pub struct HandlePaymentWebhookHandler {
    verifier: StripeWebhookVerifier,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(verifier: StripeWebhookVerifier, enrollments: Arc<dyn EnrollmentRepository>) -> Self {
        Self {
            verifier,
            enrollments,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, BillingError> {
        // 1. Verify webhook signature and parse event
        let event = self.verify(&cmd)?;

        tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Webhook verified");

        // 2. Dispatch on event type
        match event.parsed_type() {
            StripeEventType::CheckoutSessionCompleted
            | StripeEventType::CheckoutSessionAsyncPaymentSucceeded => {
                self.handle_checkout_paid(&event).await
            }
            StripeEventType::Unknown => Ok(HandlePaymentWebhookResult::Ignored {
                event_type: event.event_type,
            }),
        }
    }

    fn verify(&self, cmd: &HandlePaymentWebhookCommand) -> Result<StripeEvent, BillingError> {
        let result = match cmd.signature.as_deref() {
            Some(header) => self.verifier.verify_and_parse(&cmd.payload, header),
            None => Err(WebhookError::MissingSignature),
        };
        result.map_err(|e| {
            if e.is_authentication_failure() {
                tracing::warn!(error = %e, "Webhook rejected");
            } else {
                tracing::error!(error = %e, "Verified webhook could not be decoded");
            }
            BillingError::from(e)
        })
    }

    async fn handle_checkout_paid(
        &self,
        event: &StripeEvent,
    ) -> Result<HandlePaymentWebhookResult, BillingError> {
        let session = match event.checkout_session() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(event_id = %event.id, error = %err, "Checkout object could not be read");
                return Ok(HandlePaymentWebhookResult::Unroutable {
                    session_id: String::new(),
                    reason: err.message(),
                });
            }
        };

        if !session.is_paid() {
            tracing::info!(
                event_id = %event.id,
                session_id = %session.id,
                "Checkout completed without confirmed payment, waiting for settlement"
            );
            return Ok(HandlePaymentWebhookResult::AwaitingPayment {
                session_id: session.id,
            });
        }

        let (user_id, course_id) = match session.enrollment_target() {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    session_id = %session.id,
                    error = %err,
                    "Paid checkout does not name a buyer and course"
                );
                return Ok(HandlePaymentWebhookResult::Unroutable {
                    session_id: session.id,
                    reason: err.message(),
                });
            }
        };

        match self.enrollments.enroll(&user_id, &course_id).await {
            Ok(EnrollOutcome::Enrolled) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    course_id = %course_id,
                    "Enrolled after payment"
                );
                Ok(HandlePaymentWebhookResult::Enrolled { user_id, course_id })
            }
            Ok(EnrollOutcome::AlreadyEnrolled) => {
                tracing::debug!(
                    event_id = %event.id,
                    user_id = %user_id,
                    course_id = %course_id,
                    "Duplicate payment confirmation"
                );
                Ok(HandlePaymentWebhookResult::AlreadyEnrolled { user_id, course_id })
            }
            Err(err) if err.is(ErrorCode::UserNotFound) || err.is(ErrorCode::CourseNotFound) => {
                tracing::warn!(
                    event_id = %event.id,
                    user_id = %user_id,
                    course_id = %course_id,
                    error = %err,
                    "Paid checkout refers to a missing user or course"
                );
                Ok(HandlePaymentWebhookResult::TargetMissing { user_id, course_id })
            }
            Err(err) => Err(BillingError::infrastructure(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::billing::sign_payload;
    use serde_json::json;

    const SECRET: &str = "whsec_test_secret";

    fn handler(fx: &Fixture) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(StripeWebhookVerifier::new(SECRET), fx.enrollments())
    }

    fn event(event_type: &str, object: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "evt_1",
            "type": event_type,
            "created": chrono::Utc::now().timestamp(),
            "data": { "object": object }
        }))
        .unwrap()
    }

    fn paid_session(user_id: &UserId, course_id: &CourseId) -> serde_json::Value {
        json!({
            "id": "cs_1",
            "payment_status": "paid",
            "client_reference_id": user_id.to_string(),
            "metadata": { "userId": user_id.to_string(), "courseId": course_id.to_string() }
        })
    }

    fn signed(payload: Vec<u8>) -> HandlePaymentWebhookCommand {
        let header = sign_payload(SECRET, chrono::Utc::now().timestamp(), &payload);
        HandlePaymentWebhookCommand {
            payload,
            signature: Some(header),
        }
    }

    #[tokio::test]
    async fn replayed_event_enrolls_exactly_once() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        let cmd = signed(event("checkout.session.completed", paid_session(&ada.id, &course.id)));
        let h = handler(&fx);

        let first = h.handle(cmd.clone()).await.unwrap();
        let second = h.handle(cmd).await.unwrap();

        assert_eq!(
            first,
            HandlePaymentWebhookResult::Enrolled { user_id: ada.id, course_id: course.id }
        );
        assert_eq!(
            second,
            HandlePaymentWebhookResult::AlreadyEnrolled { user_id: ada.id, course_id: course.id }
        );
        let stored = fx.courses().find_by_id(&course.id).await.unwrap().unwrap();
        assert_eq!(stored.enrolled_students.len(), 1);
    }

    #[tokio::test]
    async fn bad_signature_enrolls_nobody() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        let payload = event("checkout.session.completed", paid_session(&ada.id, &course.id));
        let header = sign_payload("whsec_someone_else", chrono::Utc::now().timestamp(), &payload);

        let result = handler(&fx)
            .handle(HandlePaymentWebhookCommand { payload, signature: Some(header) })
            .await;

        assert!(matches!(result, Err(BillingError::InvalidSignature(_))));
        assert!(!fx.enrollments().is_enrolled(&ada.id, &course.id).await.unwrap());
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;

        let result = handler(&fx)
            .handle(HandlePaymentWebhookCommand {
                payload: event("checkout.session.completed", paid_session(&ada.id, &course.id)),
                signature: None,
            })
            .await;

        assert!(matches!(result, Err(BillingError::InvalidSignature(_))));
        assert!(!fx.enrollments().is_enrolled(&ada.id, &course.id).await.unwrap());
    }

    #[tokio::test]
    async fn tampered_body_is_rejected() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        let mut cmd = signed(event("checkout.session.completed", paid_session(&ada.id, &course.id)));
        cmd.payload = event("checkout.session.completed", paid_session(&ada.id, &CourseId::new()));

        let result = handler(&fx).handle(cmd).await;
        assert!(matches!(result, Err(BillingError::InvalidSignature(_))));
    }

    #[tokio::test]
    async fn unpaid_session_waits_for_async_success() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        let mut session = paid_session(&ada.id, &course.id);
        session["payment_status"] = json!("unpaid");
        let h = handler(&fx);

        let pending = h
            .handle(signed(event("checkout.session.completed", session)))
            .await
            .unwrap();
        assert!(matches!(pending, HandlePaymentWebhookResult::AwaitingPayment { .. }));
        assert!(!fx.enrollments().is_enrolled(&ada.id, &course.id).await.unwrap());

        let settled = h
            .handle(signed(event(
                "checkout.session.async_payment_succeeded",
                paid_session(&ada.id, &course.id),
            )))
            .await
            .unwrap();
        assert!(matches!(settled, HandlePaymentWebhookResult::Enrolled { .. }));
    }

    #[tokio::test]
    async fn other_event_types_are_ignored() {
        let fx = Fixture::new();
        let result = handler(&fx)
            .handle(signed(event("invoice.paid", json!({ "id": "in_1" }))))
            .await
            .unwrap();
        assert_eq!(
            result,
            HandlePaymentWebhookResult::Ignored { event_type: "invoice.paid".to_string() }
        );
    }

    #[tokio::test]
    async fn client_reference_stands_in_for_missing_user_metadata() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        let session = json!({
            "id": "cs_1",
            "payment_status": "paid",
            "client_reference_id": ada.id.to_string(),
            "metadata": { "courseId": course.id.to_string() }
        });

        let result = handler(&fx)
            .handle(signed(event("checkout.session.completed", session)))
            .await
            .unwrap();
        assert!(matches!(result, HandlePaymentWebhookResult::Enrolled { .. }));
    }

    #[tokio::test]
    async fn missing_course_metadata_is_acknowledged() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let session = json!({
            "id": "cs_1",
            "payment_status": "paid",
            "metadata": { "userId": ada.id.to_string() }
        });

        let result = handler(&fx)
            .handle(signed(event("checkout.session.completed", session)))
            .await
            .unwrap();
        assert_eq!(
            result,
            HandlePaymentWebhookResult::Unroutable {
                session_id: "cs_1".to_string(),
                reason: "Missing metadata: courseId".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_course_id_is_acknowledged() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let session = json!({
            "id": "cs_2",
            "payment_status": "paid",
            "metadata": { "userId": ada.id.to_string(), "courseId": "not-a-uuid" }
        });

        let result = handler(&fx)
            .handle(signed(event("checkout.session.completed", session)))
            .await
            .unwrap();
        assert!(matches!(
            result,
            HandlePaymentWebhookResult::Unroutable { ref session_id, .. } if session_id == "cs_2"
        ));
    }

    #[tokio::test]
    async fn unreadable_checkout_object_is_acknowledged() {
        let fx = Fixture::new();
        let result = handler(&fx)
            .handle(signed(event("checkout.session.completed", json!({ "payment_status": 7 }))))
            .await
            .unwrap();
        assert!(matches!(result, HandlePaymentWebhookResult::Unroutable { .. }));
    }

    #[tokio::test]
    async fn deleted_course_is_acknowledged() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let gone = CourseId::new();

        let result = handler(&fx)
            .handle(signed(event("checkout.session.completed", paid_session(&ada.id, &gone))))
            .await
            .unwrap();
        assert_eq!(
            result,
            HandlePaymentWebhookResult::TargetMissing { user_id: ada.id, course_id: gone }
        );
    }
}
