//! Attendance repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AttendanceDetailEntity, AttendanceEntity};
use crate::metrics::QueryTimer;

/// Columns selected for attendance detail rows.
const DETAIL_SELECT: &str = r#"
    SELECT
        a.id, a.registration_id, a.checked_in_at,
        s.id AS student_id, s.name AS student_name,
        e.id AS event_id, e.title AS event_title
    FROM attendance a
    JOIN registrations r ON a.registration_id = r.id
    JOIN students s ON r.student_id = s.id
    JOIN events e ON r.event_id = e.id
"#;

/// Repository for attendance-related database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an attendance row unless one already exists for the
    /// registration. Returns `None` when the unique constraint absorbed a
    /// duplicate attempt.
    pub async fn create_guarded(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_attendance_guarded");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            INSERT INTO attendance (registration_id)
            VALUES ($1)
            ON CONFLICT (registration_id) DO NOTHING
            RETURNING id, registration_id, checked_in_at
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find attendance by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_attendance_by_id");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT id, registration_id, checked_in_at
            FROM attendance
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether attendance exists for a registration.
    pub async fn exists_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_attendance_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendance WHERE registration_id = $1)",
        )
        .bind(registration_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List attendance for an event with joined student info.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<AttendanceDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_by_event");
        let result = sqlx::query_as::<_, AttendanceDetailEntity>(&format!(
            "{DETAIL_SELECT} WHERE r.event_id = $1 ORDER BY a.checked_in_at"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List attendance for a student with joined event info.
    pub async fn list_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<AttendanceDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_by_student");
        let result = sqlx::query_as::<_, AttendanceDetailEntity>(&format!(
            "{DETAIL_SELECT} WHERE r.student_id = $1 ORDER BY a.checked_in_at"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove an attendance record.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_attendance");
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: AttendanceRepository tests require a database connection and are
    // covered by integration tests.
}
