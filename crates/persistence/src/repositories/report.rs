//! Report repository: read-only aggregate queries.
//!
//! Every query recomputes from the base tables on each call. Percentage and
//! average rounding happens in the domain layer.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    AttendanceCountsEntity, EventCategoryDb, EventPopularityEntity, FeedbackAverageEntity,
    OverallCountsEntity, StudentParticipationEntity, TopActiveStudentEntity,
};
use crate::metrics::QueryTimer;

/// Default result cap for ranked reports.
pub const DEFAULT_REPORT_LIMIT: i64 = 50;

/// Default result count for the top-active-students report.
pub const DEFAULT_TOP_STUDENTS_LIMIT: i64 = 3;

/// Repository for read-only reporting queries.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new ReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Events ranked by registration count, descending.
    pub async fn event_popularity(
        &self,
        college_id: Option<Uuid>,
        category: Option<EventCategoryDb>,
        limit: i64,
    ) -> Result<Vec<EventPopularityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_event_popularity");
        let result = sqlx::query_as::<_, EventPopularityEntity>(
            r#"
            SELECT
                e.id AS event_id, e.title, e.category, c.name AS college_name,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count
            FROM events e
            JOIN colleges c ON e.college_id = c.id
            WHERE ($1::uuid IS NULL OR e.college_id = $1)
              AND ($2::event_category IS NULL OR e.category = $2)
            ORDER BY registration_count DESC, e.title
            LIMIT $3
            "#,
        )
        .bind(college_id)
        .bind(category)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-student registration and attendance counts.
    pub async fn student_participation(
        &self,
        college_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<StudentParticipationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_student_participation");
        let result = sqlx::query_as::<_, StudentParticipationEntity>(
            r#"
            SELECT
                s.id AS student_id, s.name, s.email,
                COUNT(r.id) AS events_registered,
                COUNT(a.id) AS events_attended
            FROM students s
            LEFT JOIN registrations r ON r.student_id = s.id
            LEFT JOIN attendance a ON a.registration_id = r.id
            WHERE ($1::uuid IS NULL OR s.college_id = $1)
            GROUP BY s.id, s.name, s.email
            ORDER BY events_registered DESC, s.name
            LIMIT $2
            "#,
        )
        .bind(college_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Students ranked by attendance count, descending.
    pub async fn top_active_students(
        &self,
        college_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<TopActiveStudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_top_active_students");
        let result = sqlx::query_as::<_, TopActiveStudentEntity>(
            r#"
            SELECT
                s.id AS student_id, s.name, s.email,
                COUNT(a.id) AS attendance_count
            FROM students s
            JOIN registrations r ON r.student_id = s.id
            JOIN attendance a ON a.registration_id = r.id
            WHERE ($1::uuid IS NULL OR s.college_id = $1)
            GROUP BY s.id, s.name, s.email
            ORDER BY attendance_count DESC, s.name
            LIMIT $2
            "#,
        )
        .bind(college_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-event registered and attended counts.
    pub async fn attendance_counts(
        &self,
        college_id: Option<Uuid>,
        event_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_attendance_counts");
        let result = sqlx::query_as::<_, AttendanceCountsEntity>(
            r#"
            SELECT
                e.id AS event_id, e.title,
                COUNT(r.id) AS registered,
                COUNT(a.id) AS attended
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            LEFT JOIN attendance a ON a.registration_id = r.id
            WHERE ($1::uuid IS NULL OR e.college_id = $1)
              AND ($2::uuid IS NULL OR e.id = $2)
            GROUP BY e.id, e.title
            ORDER BY e.date DESC
            "#,
        )
        .bind(college_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-event feedback counts and rating sums.
    pub async fn feedback_averages(
        &self,
        college_id: Option<Uuid>,
        event_id: Option<Uuid>,
    ) -> Result<Vec<FeedbackAverageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_feedback_averages");
        let result = sqlx::query_as::<_, FeedbackAverageEntity>(
            r#"
            SELECT
                e.id AS event_id, e.title,
                COUNT(f.id) AS feedback_count,
                COALESCE(SUM(f.rating), 0)::bigint AS rating_sum
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            LEFT JOIN feedback f ON f.registration_id = r.id
            WHERE ($1::uuid IS NULL OR e.college_id = $1)
              AND ($2::uuid IS NULL OR e.id = $2)
            GROUP BY e.id, e.title
            ORDER BY e.date DESC
            "#,
        )
        .bind(college_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Platform-wide totals, optionally scoped to one college.
    pub async fn overall_counts(
        &self,
        college_id: Option<Uuid>,
    ) -> Result<OverallCountsEntity, sqlx::Error> {
        let timer = QueryTimer::new("report_overall_counts");
        let result = sqlx::query_as::<_, OverallCountsEntity>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM colleges
                 WHERE ($1::uuid IS NULL OR id = $1)) AS total_colleges,
                (SELECT COUNT(*) FROM students
                 WHERE ($1::uuid IS NULL OR college_id = $1)) AS total_students,
                (SELECT COUNT(*) FROM events
                 WHERE ($1::uuid IS NULL OR college_id = $1)) AS total_events,
                (SELECT COUNT(*) FROM registrations r
                 JOIN events e ON r.event_id = e.id
                 WHERE ($1::uuid IS NULL OR e.college_id = $1)) AS total_registrations,
                (SELECT COUNT(*) FROM attendance a
                 JOIN registrations r ON a.registration_id = r.id
                 JOIN events e ON r.event_id = e.id
                 WHERE ($1::uuid IS NULL OR e.college_id = $1)) AS total_attendance,
                (SELECT COUNT(*) FROM feedback f
                 JOIN registrations r ON f.registration_id = r.id
                 JOIN events e ON r.event_id = e.id
                 WHERE ($1::uuid IS NULL OR e.college_id = $1)) AS total_feedback
            "#,
        )
        .bind(college_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: ReportRepository tests require a database connection and are
    // covered by integration tests.
}
