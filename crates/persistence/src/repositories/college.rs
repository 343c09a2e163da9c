//! College repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CollegeEntity, CollegeWithCountsEntity, EventWithCountEntity, StudentEntity};
use crate::metrics::QueryTimer;

/// Repository for college-related database operations.
#[derive(Clone)]
pub struct CollegeRepository {
    pool: PgPool,
}

impl CollegeRepository {
    /// Creates a new CollegeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new college.
    pub async fn create(
        &self,
        name: &str,
        email_domain: &str,
    ) -> Result<CollegeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_college");
        let result = sqlx::query_as::<_, CollegeEntity>(
            r#"
            INSERT INTO colleges (name, email_domain)
            VALUES ($1, $2)
            RETURNING id, name, email_domain, created_at
            "#,
        )
        .bind(name)
        .bind(email_domain)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find college by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CollegeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_college_by_id");
        let result = sqlx::query_as::<_, CollegeEntity>(
            r#"
            SELECT id, name, email_domain, created_at
            FROM colleges
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all colleges with student and event counts.
    pub async fn list_with_counts(&self) -> Result<Vec<CollegeWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_colleges_with_counts");
        let result = sqlx::query_as::<_, CollegeWithCountsEntity>(
            r#"
            SELECT
                c.id, c.name, c.email_domain, c.created_at,
                (SELECT COUNT(*) FROM students s WHERE s.college_id = c.id) AS student_count,
                (SELECT COUNT(*) FROM events e WHERE e.college_id = c.id) AS event_count
            FROM colleges c
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a college. Unset fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email_domain: Option<&str>,
    ) -> Result<Option<CollegeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_college");
        let result = sqlx::query_as::<_, CollegeEntity>(
            r#"
            UPDATE colleges
            SET name = COALESCE($2, name),
                email_domain = COALESCE($3, email_domain)
            WHERE id = $1
            RETURNING id, name, email_domain, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email_domain)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a college. The caller must check dependents first; the foreign
    /// keys are RESTRICT so a dependent row fails the delete regardless.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_college");
        let result = sqlx::query("DELETE FROM colleges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count students and events owned by a college.
    pub async fn dependent_counts(&self, id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let timer = QueryTimer::new("count_college_dependents");
        let result = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students WHERE college_id = $1),
                (SELECT COUNT(*) FROM events WHERE college_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List students belonging to a college.
    pub async fn students_of(&self, id: Uuid) -> Result<Vec<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_college_students");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, name, email, is_verified, verification_token, college_id, created_at
            FROM students
            WHERE college_id = $1
            ORDER BY name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List events belonging to a college, with registration counts.
    pub async fn events_of(&self, id: Uuid) -> Result<Vec<EventWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_college_events");
        let result = sqlx::query_as::<_, EventWithCountEntity>(
            r#"
            SELECT
                e.id, e.title, e.description, e.date, e.venue, e.category,
                e.max_capacity, e.allow_other_colleges, e.status, e.college_id, e.created_at,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count
            FROM events e
            WHERE e.college_id = $1
            ORDER BY e.date DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: CollegeRepository tests require a database connection and are
    // covered by integration tests.
}
