//! Stripe webhook event types.
//!
//! Only the fields needed to turn a completed checkout into an enrollment
//! are captured; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{CourseId, UserId};

use super::errors::BillingError;

/// Metadata key carrying the purchasing user's id.
pub const METADATA_USER_ID: &str = "userId";

/// Metadata key carrying the purchased course's id.
pub const METADATA_COURSE_ID: &str = "courseId";

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp of event creation.
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event, shape depends on the event type.
    pub object: serde_json::Value,
}

/// Event types this service reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    CheckoutSessionCompleted,
    /// Delayed payment methods settle after the session completes.
    CheckoutSessionAsyncPaymentSucceeded,
    Unknown,
}

impl StripeEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "checkout.session.async_payment_succeeded" => {
                Self::CheckoutSessionAsyncPaymentSucceeded
            }
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CheckoutSessionAsyncPaymentSucceeded => {
                "checkout.session.async_payment_succeeded"
            }
            Self::Unknown => "unknown",
        }
    }
}

impl StripeEvent {
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }

    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, BillingError> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| BillingError::validation("data.object", e.to_string()))
    }
}

/// The `checkout.session` object embedded in checkout events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSessionObject {
    pub id: String,

    /// `paid`, `unpaid` or `no_payment_required`.
    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub client_reference_id: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionObject {
    /// Whether the funds are confirmed. Absent status is treated as paid.
    pub fn is_paid(&self) -> bool {
        !matches!(self.payment_status.as_deref(), Some("unpaid"))
    }

    /// The (user, course) pair this purchase enrolls.
    ///
    /// The user falls back to `client_reference_id` when metadata lacks it.
    pub fn enrollment_target(&self) -> Result<(UserId, CourseId), BillingError> {
        let raw_user = self
            .metadata
            .get(METADATA_USER_ID)
            .or(self.client_reference_id.as_ref())
            .ok_or(BillingError::MissingMetadata(METADATA_USER_ID))?;
        let raw_course = self
            .metadata
            .get(METADATA_COURSE_ID)
            .ok_or(BillingError::MissingMetadata(METADATA_COURSE_ID))?;

        let user_id = UserId::parse(raw_user)?;
        let course_id = CourseId::parse(raw_course)?;
        Ok((user_id, course_id))
    }
}

/// Builder for test events.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "checkout.session.completed".to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({ "id": "cs_test_123" }),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: false,
            api_version: Some("2024-06-20".to_string()),
        }
    }
}
