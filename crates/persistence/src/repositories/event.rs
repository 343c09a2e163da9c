//! Event repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventCategoryDb, EventEntity, EventStatusDb, EventWithCountEntity};
use crate::metrics::QueryTimer;

/// Columns selected for plain event rows.
const EVENT_COLUMNS: &str = "id, title, description, date, venue, category, \
     max_capacity, allow_other_colleges, status, college_id, created_at";

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        date: DateTime<Utc>,
        venue: &str,
        category: EventCategoryDb,
        max_capacity: Option<i32>,
        allow_other_colleges: bool,
        college_id: Uuid,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            INSERT INTO events
                (title, description, date, venue, category, max_capacity, allow_other_colleges, college_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(venue)
        .bind(category)
        .bind(max_capacity)
        .bind(allow_other_colleges)
        .bind(college_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find event by ID with its registration count.
    pub async fn find_with_count(
        &self,
        id: Uuid,
    ) -> Result<Option<EventWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_with_count");
        let result = sqlx::query_as::<_, EventWithCountEntity>(
            r#"
            SELECT
                e.id, e.title, e.description, e.date, e.venue, e.category,
                e.max_capacity, e.allow_other_colleges, e.status, e.college_id, e.created_at,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count
            FROM events e
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List events with registration counts. Null filters match everything;
    /// `upcoming` keeps only events dated now or later.
    pub async fn list(
        &self,
        college_id: Option<Uuid>,
        category: Option<EventCategoryDb>,
        upcoming: bool,
    ) -> Result<Vec<EventWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventWithCountEntity>(
            r#"
            SELECT
                e.id, e.title, e.description, e.date, e.venue, e.category,
                e.max_capacity, e.allow_other_colleges, e.status, e.college_id, e.created_at,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count
            FROM events e
            WHERE ($1::uuid IS NULL OR e.college_id = $1)
              AND ($2::event_category IS NULL OR e.category = $2)
              AND (NOT $3 OR e.date >= NOW())
            ORDER BY e.date
            "#,
        )
        .bind(college_id)
        .bind(category)
        .bind(upcoming)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an event. Unset fields keep their current value; the owning
    /// college is immutable.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        date: Option<DateTime<Utc>>,
        venue: Option<&str>,
        category: Option<EventCategoryDb>,
        max_capacity: Option<i32>,
        allow_other_colleges: Option<bool>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                venue = COALESCE($5, venue),
                category = COALESCE($6, category),
                max_capacity = COALESCE($7, max_capacity),
                allow_other_colleges = COALESCE($8, allow_other_colleges)
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(venue)
        .bind(category)
        .bind(max_capacity)
        .bind(allow_other_colleges)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set an event's status (cancel).
    pub async fn set_status(
        &self,
        id: Uuid,
        status: EventStatusDb,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_event_status");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            UPDATE events
            SET status = $2
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count registrations for an event.
    pub async fn registration_count(&self, id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_event_registrations");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    /// Delete an event. The caller checks for registrations first; deletion
    /// of events with registrations is blocked at the handler layer.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
