//! PostgreSQL implementation of CourseRepository.
//!
//! A course spans four tables: `courses`, `lessons`, `ratings` and the
//! `enrollments` projection. Reads batch the child tables with `= ANY($1)`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::catalog::{Course, Lesson, Rating, RatingValue};
use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, LessonId, Percentage, RatingId, UserId,
};
use crate::ports::CourseRepository;

/// PostgreSQL implementation of the CourseRepository port.
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, rows: Vec<CourseRow>) -> Result<Vec<Course>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let lessons: Vec<LessonRow> = sqlx::query_as(
            r#"
            SELECT course_id, id, title, description, student_description, video_url, position
            FROM lessons
            WHERE course_id = ANY($1)
            ORDER BY course_id, position, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load lessons", e))?;

        let ratings: Vec<RatingRow> = sqlx::query_as(
            r#"
            SELECT id, course_id, user_id, value, comment, created_at
            FROM ratings
            WHERE course_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load ratings", e))?;

        let enrollments: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"SELECT course_id, user_id FROM enrollments WHERE course_id = ANY($1)"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load enrollments", e))?;

        let mut lessons_by_course: HashMap<Uuid, Vec<Lesson>> = HashMap::new();
        for row in lessons {
            lessons_by_course
                .entry(row.course_id)
                .or_default()
                .push(row.into());
        }
        let mut ratings_by_course: HashMap<Uuid, Vec<Rating>> = HashMap::new();
        for row in ratings {
            let course_id = row.course_id;
            ratings_by_course
                .entry(course_id)
                .or_default()
                .push(Rating::try_from(row)?);
        }
        let mut students_by_course: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
        for (course_id, user_id) in enrollments {
            students_by_course
                .entry(course_id)
                .or_default()
                .insert(UserId::from_uuid(user_id));
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_course(
                    lessons_by_course.remove(&id).unwrap_or_default(),
                    ratings_by_course.remove(&id).unwrap_or_default(),
                    students_by_course.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    async fn write_lessons(
        tx: &mut Transaction<'_, Postgres>,
        course: &Course,
    ) -> Result<(), DomainError> {
        let keep: Vec<Uuid> = course.lessons.iter().map(|l| *l.id.as_uuid()).collect();

        sqlx::query(r#"DELETE FROM lessons WHERE course_id = $1 AND NOT (id = ANY($2))"#)
            .bind(course.id.as_uuid())
            .bind(&keep)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("Failed to prune lessons", e))?;

        for lesson in &course.lessons {
            sqlx::query(
                r#"
                INSERT INTO lessons (
                    course_id, id, title, description, student_description, video_url, position
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (course_id, id) DO UPDATE SET
                    title = EXCLUDED.title,
                    description = EXCLUDED.description,
                    student_description = EXCLUDED.student_description,
                    video_url = EXCLUDED.video_url,
                    position = EXCLUDED.position
                "#,
            )
            .bind(course.id.as_uuid())
            .bind(lesson.id.as_uuid())
            .bind(&lesson.title)
            .bind(&lesson.description)
            .bind(&lesson.student_description)
            .bind(&lesson.video_url)
            .bind(lesson.order)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("Failed to save lesson", e))?;
        }

        Ok(())
    }
}

/// Database row representation of a course.
#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    student_description: Option<String>,
    instructor: String,
    price: f64,
    discount: i16,
    previous_price: Option<f64>,
    thumbnail: Option<String>,
    duration: Option<String>,
    created_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(
        self,
        lessons: Vec<Lesson>,
        ratings: Vec<Rating>,
        enrolled_students: BTreeSet<UserId>,
    ) -> Result<Course, DomainError> {
        let discount = Percentage::try_new(self.discount as i64).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored discount: {}", e))
        })?;
        Ok(Course {
            id: CourseId::from_uuid(self.id),
            title: self.title,
            description: self.description,
            student_description: self.student_description,
            instructor: self.instructor,
            price: self.price,
            discount,
            previous_price: self.previous_price,
            thumbnail: self.thumbnail,
            duration: self.duration,
            lessons,
            ratings,
            enrolled_students,
            created_at: self.created_at.into(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LessonRow {
    course_id: Uuid,
    id: Uuid,
    title: String,
    description: Option<String>,
    student_description: Option<String>,
    video_url: Option<String>,
    position: i32,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: LessonId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            student_description: row.student_description,
            video_url: row.video_url,
            order: row.position,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    course_id: Uuid,
    user_id: Uuid,
    value: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = DomainError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let value = RatingValue::try_new(row.value as i64).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored rating: {}", e))
        })?;
        Ok(Rating {
            id: RatingId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            value,
            comment: row.comment,
            created_at: row.created_at.into(),
        })
    }
}

fn course_not_found(id: &CourseId) -> DomainError {
    DomainError::new(ErrorCode::CourseNotFound, "Course not found")
        .with_detail("course_id", id.to_string())
}

const COURSE_COLUMNS: &str = r#"
    SELECT id, title, description, student_description, instructor, price, discount,
           previous_price, thumbnail, duration, created_at
    FROM courses
"#;

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let sql = format!("{} ORDER BY created_at, id", COURSE_COLUMNS);
        let rows: Vec<CourseRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list courses", e))?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let sql = format!("{} WHERE id = $1", COURSE_COLUMNS);
        let row: Option<CourseRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to load course", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, course: &Course) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO courses (
                id, title, description, student_description, instructor, price, discount,
                previous_price, thumbnail, duration, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.student_description)
        .bind(&course.instructor)
        .bind(course.price)
        .bind(course.discount.value() as i16)
        .bind(course.previous_price)
        .bind(&course.thumbnail)
        .bind(&course.duration)
        .bind(course.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to save course", e))?;

        Self::write_lessons(&mut tx, course).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit course", e))
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE courses SET
                title = $2,
                description = $3,
                student_description = $4,
                instructor = $5,
                price = $6,
                discount = $7,
                previous_price = $8,
                thumbnail = $9,
                duration = $10
            WHERE id = $1
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.student_description)
        .bind(&course.instructor)
        .bind(course.price)
        .bind(course.discount.value() as i16)
        .bind(course.previous_price)
        .bind(&course.thumbnail)
        .bind(&course.duration)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update course", e))?;

        if result.rows_affected() == 0 {
            return Err(course_not_found(&course.id));
        }

        Self::write_lessons(&mut tx, course).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit course", e))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError> {
        let result = sqlx::query(r#"DELETE FROM courses WHERE id = $1"#)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete course", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_rating(&self, course_id: &CourseId, rating: &Rating) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ratings (id, course_id, user_id, value, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(rating.id.as_uuid())
        .bind(course_id.as_uuid())
        .bind(rating.user_id.as_uuid())
        .bind(rating.value.value() as i16)
        .bind(&rating.comment)
        .bind(rating.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("ratings_course_id_user_id_key") => {
                        return DomainError::new(ErrorCode::AlreadyRated, "Already rated")
                            .with_detail("course_id", course_id.to_string());
                    }
                    Some("ratings_course_id_fkey") => return course_not_found(course_id),
                    Some("ratings_user_id_fkey") => {
                        return DomainError::new(ErrorCode::UserNotFound, "User not found")
                            .with_detail("user_id", rating.user_id.to_string());
                    }
                    _ => {}
                }
            }
            DomainError::database("Failed to save rating", e)
        })?;

        Ok(())
    }

    async fn delete_rating(
        &self,
        course_id: &CourseId,
        rating_id: &RatingId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"DELETE FROM ratings WHERE id = $1 AND course_id = $2 AND user_id = $3"#,
        )
        .bind(rating_id.as_uuid())
        .bind(course_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to delete rating", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::RatingNotFound, "Rating not found"));
        }
        Ok(())
    }
}
