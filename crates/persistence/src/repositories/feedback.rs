//! Feedback repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{FeedbackDetailEntity, FeedbackEntity, RatingCountEntity};
use crate::metrics::QueryTimer;

/// Repository for feedback-related database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a feedback row unless one already exists for the registration.
    /// Returns `None` when the unique constraint absorbed a duplicate
    /// attempt.
    pub async fn create_guarded(
        &self,
        registration_id: Uuid,
        rating: i32,
        comments: Option<&str>,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_feedback_guarded");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO feedback (registration_id, rating, comments)
            VALUES ($1, $2, $3)
            ON CONFLICT (registration_id) DO NOTHING
            RETURNING id, registration_id, rating, comments, submitted_at
            "#,
        )
        .bind(registration_id)
        .bind(rating)
        .bind(comments)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find feedback by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feedback_by_id");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            SELECT id, registration_id, rating, comments, submitted_at
            FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether feedback exists for a registration.
    pub async fn exists_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_feedback_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM feedback WHERE registration_id = $1)",
        )
        .bind(registration_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List feedback for an event with joined student info.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<FeedbackDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feedback_by_event");
        let result = sqlx::query_as::<_, FeedbackDetailEntity>(
            r#"
            SELECT
                f.id, f.registration_id, f.rating, f.comments, f.submitted_at,
                s.id AS student_id, s.name AS student_name,
                e.id AS event_id, e.title AS event_title
            FROM feedback f
            JOIN registrations r ON f.registration_id = r.id
            JOIN students s ON r.student_id = s.id
            JOIN events e ON r.event_id = e.id
            WHERE r.event_id = $1
            ORDER BY f.submitted_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a feedback entry. Unset fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        rating: Option<i32>,
        comments: Option<&str>,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_feedback");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            UPDATE feedback
            SET rating = COALESCE($2, rating),
                comments = COALESCE($3, comments)
            WHERE id = $1
            RETURNING id, registration_id, rating, comments, submitted_at
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(comments)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a feedback entry.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_feedback");
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count and rating sum for an event's feedback.
    pub async fn totals_for_event(&self, event_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let timer = QueryTimer::new("feedback_totals_for_event");
        let result = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(f.rating), 0)::bigint
            FROM feedback f
            JOIN registrations r ON f.registration_id = r.id
            WHERE r.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rating distribution for an event. Only ratings with at least one
    /// entry appear; the caller fills in empty buckets.
    pub async fn distribution_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<RatingCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("feedback_distribution_for_event");
        let result = sqlx::query_as::<_, RatingCountEntity>(
            r#"
            SELECT f.rating, COUNT(*) AS count
            FROM feedback f
            JOIN registrations r ON f.registration_id = r.id
            WHERE r.event_id = $1
            GROUP BY f.rating
            ORDER BY f.rating
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
