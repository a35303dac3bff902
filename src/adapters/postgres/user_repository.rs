//! PostgreSQL implementation of UserRepository.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::User;
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, LessonId, UserId};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
///
/// Enrolled courses are read from `enrollments`; completed lessons from
/// `completed_lessons`.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches enrollment and progress sets to freshly loaded rows.
    async fn hydrate(&self, rows: Vec<UserRow>) -> Result<Vec<User>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let enrollments: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"SELECT user_id, course_id FROM enrollments WHERE user_id = ANY($1)"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load enrollments", e))?;

        let completed: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"SELECT user_id, lesson_id FROM completed_lessons WHERE user_id = ANY($1)"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load completed lessons", e))?;

        let mut enrolled_by_user: HashMap<Uuid, BTreeSet<CourseId>> = HashMap::new();
        for (user_id, course_id) in enrollments {
            enrolled_by_user
                .entry(user_id)
                .or_default()
                .insert(CourseId::from_uuid(course_id));
        }
        let mut completed_by_user: HashMap<Uuid, BTreeSet<LessonId>> = HashMap::new();
        for (user_id, lesson_id) in completed {
            completed_by_user
                .entry(user_id)
                .or_default()
                .insert(LessonId::from_uuid(lesson_id));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let enrolled = enrolled_by_user.remove(&row.id).unwrap_or_default();
                let done = completed_by_user.remove(&row.id).unwrap_or_default();
                row.into_user(enrolled, done)
            })
            .collect())
    }

    async fn hydrate_one(&self, row: Option<UserRow>) -> Result<Option<User>, DomainError> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load user", e))?;

        self.hydrate_one(row).await
    }

    async fn user_exists(&self, id: &UserId) -> Result<bool, DomainError> {
        let found: Option<(Uuid,)> = sqlx::query_as(r#"SELECT id FROM users WHERE id = $1"#)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to load user", e))?;
        Ok(found.is_some())
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, enrolled: BTreeSet<CourseId>, completed: BTreeSet<LessonId>) -> User {
        User {
            id: UserId::from_uuid(self.id),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            is_admin: self.is_admin,
            enrolled_courses: enrolled,
            completed_lessons: completed,
            created_at: self.created_at.into(),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::new(ErrorCode::EmailTaken, "Email already registered")
                        .with_detail("email", user.email.clone());
                }
            }
            DomainError::database("Failed to save user", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.fetch_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load user", e))?;

        self.hydrate_one(row).await
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, is_admin, created_at
            FROM users
            WHERE id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load users", e))?;

        self.hydrate(rows).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, is_admin, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list users", e))?;

        self.hydrate(rows).await
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_admin(&self, id: &UserId, is_admin: bool) -> Result<Option<User>, DomainError> {
        let result = sqlx::query(r#"UPDATE users SET is_admin = $2 WHERE id = $1"#)
            .bind(id.as_uuid())
            .bind(is_admin)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_by_id(id).await
    }

    async fn add_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError> {
        if !self.user_exists(id).await? {
            return Ok(None);
        }
        let inserted = sqlx::query(
            r#"
            INSERT INTO completed_lessons (user_id, lesson_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id.as_uuid())
        .bind(lesson_id.as_uuid())
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            // deleted between the existence check and the insert
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("completed_lessons_user_id_fkey") =>
            {
                return Ok(None);
            }
            Err(e) => return Err(DomainError::database("Failed to record lesson completion", e)),
        }

        self.fetch_by_id(id).await
    }

    async fn remove_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError> {
        sqlx::query(r#"DELETE FROM completed_lessons WHERE user_id = $1 AND lesson_id = $2"#)
            .bind(id.as_uuid())
            .bind(lesson_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to clear lesson completion", e))?;

        self.fetch_by_id(id).await
    }
}
