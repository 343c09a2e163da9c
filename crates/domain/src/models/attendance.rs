//! Attendance domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Confirmation that a registered student checked in on the event day.
/// At most one per registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

/// Request to mark attendance for a single registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub registration_id: Uuid,
}

/// Request to mark attendance for many students of one event at once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceRequest {
    pub event_id: Uuid,

    #[validate(length(min = 1, message = "studentIds must not be empty"))]
    pub student_ids: Vec<Uuid>,
}

/// Per-item outcome of a bulk attendance request. Failed items never roll
/// back succeeded ones.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceOutcome {
    pub student_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response for a bulk attendance request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceResponse {
    pub marked: usize,
    pub failed: usize,
    pub results: Vec<BulkAttendanceOutcome>,
}

/// Attendance with joined student info for per-event listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDetail {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub student_id: Uuid,
    pub student_name: String,
    pub event_id: Uuid,
    pub event_title: String,
}
