//! EnrollHandler - Command handler for enrolling without payment.

use std::sync::Arc;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{Capability, CourseId, UserId};
use crate::ports::{AccessGate, EnrollOutcome, EnrollmentRepository};

#[derive(Debug, Clone)]
pub struct EnrollCommand {
    pub caller: UserId,
    pub course_id: CourseId,
}

/// Handler for direct enrollment.
///
/// Honoured only when the deployment allows it or the caller's role grants
/// `EnrollWithoutPayment`. Unlike the webhook path, a repeat enrollment is
/// reported as `AlreadyEnrolled`.
pub struct EnrollHandler {
    gate: Arc<dyn AccessGate>,
    enrollments: Arc<dyn EnrollmentRepository>,
    allow_direct_enroll: bool,
}

impl EnrollHandler {
    pub fn new(
        gate: Arc<dyn AccessGate>,
        enrollments: Arc<dyn EnrollmentRepository>,
        allow_direct_enroll: bool,
    ) -> Self {
        Self {
            gate,
            enrollments,
            allow_direct_enroll,
        }
    }

    pub async fn handle(&self, cmd: EnrollCommand) -> Result<(), CatalogError> {
        // 1. Payment bypass must be allowed
        if !self.allow_direct_enroll
            && !self
                .gate
                .allows(&cmd.caller, Capability::EnrollWithoutPayment)
                .await
        {
            return Err(CatalogError::forbidden(
                "Enrollment requires completing checkout",
            ));
        }

        // 2. Single idempotent write covers both sides of the relation
        match self.enrollments.enroll(&cmd.caller, &cmd.course_id).await? {
            EnrollOutcome::Enrolled => {
                tracing::info!(user_id = %cmd.caller, course_id = %cmd.course_id, "User enrolled");
                Ok(())
            }
            EnrollOutcome::AlreadyEnrolled => Err(CatalogError::AlreadyEnrolled(cmd.course_id)),
        }
    }
}
