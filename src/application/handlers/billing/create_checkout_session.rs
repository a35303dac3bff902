//! CreateCheckoutSessionHandler - Command handler for starting a course purchase.

use std::sync::Arc;

use crate::domain::billing::{BillingError, CheckoutRedirects, CoursePurchase};
use crate::domain::foundation::{CourseId, DomainError, UserId};
use crate::ports::{CourseRepository, CreateCheckoutRequest, PaymentProvider};

#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub caller: UserId,
    pub course_id: CourseId,
}

/// Hosted checkout page the buyer should be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub session_id: String,
    pub url: String,
}

/// Handler for creating checkout sessions.
///
/// Nothing is stored locally. The buyer and course travel to the processor
/// as session metadata and come back on the completion webhook.
pub struct CreateCheckoutSessionHandler {
    courses: Arc<dyn CourseRepository>,
    payments: Arc<dyn PaymentProvider>,
    currency: String,
    frontend_base: String,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        payments: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
        frontend_base: impl Into<String>,
    ) -> Self {
        Self {
            courses,
            payments,
            currency: currency.into(),
            frontend_base: frontend_base.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutRedirect, BillingError> {
        // 1. Price comes from the stored course, never from the caller
        let course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or(BillingError::CourseNotFound(cmd.course_id))?;

        let purchase = CoursePurchase::of(&course);
        let redirects = CheckoutRedirects::for_course(&self.frontend_base, &course.id);

        // 2. Open the hosted session
        let request = CreateCheckoutRequest {
            user_id: cmd.caller,
            course_id: purchase.course_id,
            product_name: purchase.product_name,
            product_description: course.description.clone(),
            unit_amount: purchase.unit_amount,
            currency: self.currency.to_lowercase(),
            success_url: redirects.success_url,
            cancel_url: redirects.cancel_url,
        };

        let session = self
            .payments
            .create_checkout_session(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %cmd.caller,
                    course_id = %cmd.course_id,
                    error = %e,
                    "Checkout session creation failed"
                );
                BillingError::from(DomainError::from(e))
            })?;

        tracing::info!(
            user_id = %cmd.caller,
            course_id = %cmd.course_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(CheckoutRedirect {
            session_id: session.id,
            url: session.url,
        })
    }
}
