//! Registration repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RegistrationDetailEntity, RegistrationEntity};
use crate::metrics::QueryTimer;

/// Columns selected for registration detail rows.
const DETAIL_SELECT: &str = r#"
    SELECT
        r.id, r.student_id, r.event_id, r.registered_at,
        s.name AS student_name, s.email AS student_email,
        e.title AS event_title, e.date AS event_date, e.venue AS event_venue,
        EXISTS(SELECT 1 FROM attendance a WHERE a.registration_id = r.id) AS has_attended,
        EXISTS(SELECT 1 FROM feedback f WHERE f.registration_id = r.id) AS has_feedback
    FROM registrations r
    JOIN students s ON r.student_id = s.id
    JOIN events e ON r.event_id = e.id
"#;

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration, enforcing capacity and uniqueness atomically.
    ///
    /// The transaction takes a `FOR UPDATE` lock on the event row before
    /// counting, so concurrent inserts for the same event serialize on the
    /// capacity check (a plain COUNT subquery would read a snapshot that
    /// misses other in-flight inserts under READ COMMITTED). Capacity is
    /// unbounded when `max_capacity` is NULL, and the unique constraint on
    /// (student_id, event_id) absorbs duplicate attempts via `ON CONFLICT DO
    /// NOTHING`. Returns `None` when either guard fired; the caller re-reads
    /// state to classify which one.
    pub async fn create_guarded(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_registration_guarded");
        let result = self.create_guarded_tx(student_id, event_id).await;
        timer.record();
        result
    }

    async fn create_guarded_tx(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let max_capacity: Option<Option<i32>> =
            sqlx::query_scalar("SELECT max_capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

        // Event deleted between the caller's lookup and here.
        let Some(max_capacity) = max_capacity else {
            return Ok(None);
        };

        if let Some(capacity) = max_capacity {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
                    .bind(event_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if count >= i64::from(capacity) {
                return Ok(None);
            }
        }

        let row = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            INSERT INTO registrations (student_id, event_id)
            VALUES ($1, $2)
            ON CONFLICT (student_id, event_id) DO NOTHING
            RETURNING id, student_id, event_id, registered_at
            "#,
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Find registration by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, student_id, event_id, registered_at
            FROM registrations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find registration for a (student, event) pair.
    pub async fn find_by_student_event(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_student_event");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, student_id, event_id, registered_at
            FROM registrations
            WHERE student_id = $1 AND event_id = $2
            "#,
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a (student, event) registration exists.
    pub async fn exists(&self, student_id: Uuid, event_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_registration_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE student_id = $1 AND event_id = $2)",
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find registration detail (joined student/event info) by ID.
    pub async fn find_detail(
        &self,
        id: Uuid,
    ) -> Result<Option<RegistrationDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_detail");
        let result = sqlx::query_as::<_, RegistrationDetailEntity>(&format!(
            "{DETAIL_SELECT} WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List registrations for an event with joined details.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<RegistrationDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_by_event");
        let result = sqlx::query_as::<_, RegistrationDetailEntity>(&format!(
            "{DETAIL_SELECT} WHERE r.event_id = $1 ORDER BY r.registered_at"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List registrations for a student with joined details.
    pub async fn list_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<RegistrationDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_by_student");
        let result = sqlx::query_as::<_, RegistrationDetailEntity>(&format!(
            "{DETAIL_SELECT} WHERE r.student_id = $1 ORDER BY r.registered_at"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether attendance was marked for a registration.
    pub async fn has_attendance(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_registration_attendance");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendance WHERE registration_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether feedback was submitted for a registration.
    pub async fn has_feedback(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_registration_feedback");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM feedback WHERE registration_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a registration. Attendance and feedback cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: RegistrationRepository tests require a database connection and
    // are covered by integration tests.
}
