//! PostgreSQL implementation of EnrollmentRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};
use crate::ports::{EnrollOutcome, EnrollmentRepository};

/// Enrollment as a single-row upsert keyed on (user, course).
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn enroll(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(course_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("enrollments_user_id_fkey") => {
                        return DomainError::new(ErrorCode::UserNotFound, "User not found")
                            .with_detail("user_id", user_id.to_string());
                    }
                    Some("enrollments_course_id_fkey") => {
                        return DomainError::new(ErrorCode::CourseNotFound, "Course not found")
                            .with_detail("course_id", course_id.to_string());
                    }
                    _ => {}
                }
            }
            DomainError::database("Failed to save enrollment", e)
        })?;

        if result.rows_affected() == 0 {
            Ok(EnrollOutcome::AlreadyEnrolled)
        } else {
            Ok(EnrollOutcome::Enrolled)
        }
    }

    async fn is_enrolled(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        let found: Option<(i32,)> = sqlx::query_as(
            r#"SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2"#,
        )
        .bind(user_id.as_uuid())
        .bind(course_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load enrollment", e))?;

        Ok(found.is_some())
    }
}
