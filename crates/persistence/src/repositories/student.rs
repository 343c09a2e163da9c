//! Student repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{StudentEntity, StudentEventEntity};
use crate::metrics::QueryTimer;

/// Repository for student-related database operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new student.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        college_id: Uuid,
        is_verified: bool,
        verification_token: Option<&str>,
    ) -> Result<StudentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_student");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            INSERT INTO students (name, email, college_id, is_verified, verification_token)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, is_verified, verification_token, college_id, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(college_id)
        .bind(is_verified)
        .bind(verification_token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find student by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_id");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, name, email, is_verified, verification_token, college_id, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find student by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_email");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, name, email, is_verified, verification_token, college_id, created_at
            FROM students
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List students, optionally filtered by college.
    pub async fn list(
        &self,
        college_id: Option<Uuid>,
    ) -> Result<Vec<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_students");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, name, email, is_verified, verification_token, college_id, created_at
            FROM students
            WHERE ($1::uuid IS NULL OR college_id = $1)
            ORDER BY name
            "#,
        )
        .bind(college_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a student verified when the supplied token matches, clearing the
    /// token so it cannot be reused.
    pub async fn verify_with_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("verify_student_with_token");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET is_verified = TRUE, verification_token = NULL
            WHERE id = $1 AND verification_token = $2
            RETURNING id, name, email, is_verified, verification_token, college_id, created_at
            "#,
        )
        .bind(id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a student's verification token.
    pub async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_student_verification_token");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET verification_token = $2
            WHERE id = $1
            RETURNING id, name, email, is_verified, verification_token, college_id, created_at
            "#,
        )
        .bind(id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a student. Registrations (and their attendance/feedback)
    /// cascade at the schema level.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_student");
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List events visible to a student, annotated with their registration,
    /// attendance, and feedback status.
    pub async fn events_for_student(
        &self,
        student_id: Uuid,
        student_college_id: Uuid,
    ) -> Result<Vec<StudentEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_student_events");
        let result = sqlx::query_as::<_, StudentEventEntity>(
            r#"
            SELECT
                e.id, e.title, e.description, e.date, e.venue, e.category,
                e.max_capacity, e.allow_other_colleges, e.status, e.college_id, e.created_at,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count,
                EXISTS(
                    SELECT 1 FROM registrations r
                    WHERE r.event_id = e.id AND r.student_id = $1
                ) AS is_registered,
                EXISTS(
                    SELECT 1 FROM registrations r
                    JOIN attendance a ON a.registration_id = r.id
                    WHERE r.event_id = e.id AND r.student_id = $1
                ) AS has_attended,
                EXISTS(
                    SELECT 1 FROM registrations r
                    JOIN feedback f ON f.registration_id = r.id
                    WHERE r.event_id = e.id AND r.student_id = $1
                ) AS has_feedback
            FROM events e
            WHERE e.college_id = $2 OR e.allow_other_colleges = TRUE
            ORDER BY e.date
            "#,
        )
        .bind(student_id)
        .bind(student_college_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: StudentRepository tests require a database connection and are
    // covered by integration tests.
}
