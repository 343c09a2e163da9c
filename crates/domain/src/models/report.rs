//! Read-only report shapes.
//!
//! Every report is recomputed fully from SQL aggregates on each call; none of
//! these carry mutable state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventCategory;

/// Common query filters accepted by the report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub college_id: Option<Uuid>,
    pub category: Option<EventCategory>,
    pub event_id: Option<Uuid>,
    pub limit: Option<i64>,
}

/// Events ranked by registration count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPopularityEntry {
    pub event_id: Uuid,
    pub title: String,
    pub category: EventCategory,
    pub college_name: String,
    pub registration_count: i64,
}

/// Per-student participation across events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentParticipationEntry {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub events_registered: i64,
    pub events_attended: i64,
    /// round(100 * attended / registered); 0 when nothing registered.
    pub attendance_rate: i64,
}

/// Students ranked by attendance count descending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopActiveStudentEntry {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub attendance_count: i64,
}

/// Per-event attendance percentage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePercentageEntry {
    pub event_id: Uuid,
    pub title: String,
    pub registered: i64,
    pub attended: i64,
    pub attendance_percentage: i64,
}

/// Per-event average feedback rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageFeedbackEntry {
    pub event_id: Uuid,
    pub title: String,
    pub feedback_count: i64,
    pub average_rating: f64,
}

/// Platform-wide totals for the dashboard landing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_colleges: i64,
    pub total_students: i64,
    pub total_events: i64,
    pub total_registrations: i64,
    pub total_attendance: i64,
    pub total_feedback: i64,
    pub overall_attendance_percentage: i64,
}
