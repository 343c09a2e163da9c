//! Report aggregate entities (database row mappings).
//!
//! Rounding of percentages and averages happens in the domain layer; these
//! rows carry raw counts and sums.

use sqlx::FromRow;
use uuid::Uuid;

use super::event::EventCategoryDb;

/// Event ranked by registration count.
#[derive(Debug, Clone, FromRow)]
pub struct EventPopularityEntity {
    pub event_id: Uuid,
    pub title: String,
    pub category: EventCategoryDb,
    pub college_name: String,
    pub registration_count: i64,
}

/// Per-student registration/attendance counts.
#[derive(Debug, Clone, FromRow)]
pub struct StudentParticipationEntity {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub events_registered: i64,
    pub events_attended: i64,
}

/// Student ranked by attendance count.
#[derive(Debug, Clone, FromRow)]
pub struct TopActiveStudentEntity {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub attendance_count: i64,
}

/// Per-event registered/attended counts.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceCountsEntity {
    pub event_id: Uuid,
    pub title: String,
    pub registered: i64,
    pub attended: i64,
}

/// Per-event feedback count and rating sum.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackAverageEntity {
    pub event_id: Uuid,
    pub title: String,
    pub feedback_count: i64,
    pub rating_sum: i64,
}

/// Platform-wide totals.
#[derive(Debug, Clone, FromRow)]
pub struct OverallCountsEntity {
    pub total_colleges: i64,
    pub total_students: i64,
    pub total_events: i64,
    pub total_registrations: i64,
    pub total_attendance: i64,
    pub total_feedback: i64,
}
