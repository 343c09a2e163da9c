//! Feedback domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Post-event rating and optional comments, tied to one attended
/// registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub rating: i32,
    pub comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Request to submit feedback for a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub registration_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comments too long"))]
    pub comments: Option<String>,
}

/// Feedback body for the student-self route (registration resolved from the
/// path).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comments too long"))]
    pub comments: Option<String>,
}

/// Request to update an existing feedback entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(length(max = 2000, message = "Comments too long"))]
    pub comments: Option<String>,
}

/// Feedback with joined student info for per-event listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDetail {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub student_id: Uuid,
    pub student_name: String,
    pub event_id: Uuid,
    pub event_title: String,
}

/// Count of feedback entries at one rating value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

/// Aggregate feedback statistics for an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub event_id: Uuid,
    pub feedback_count: i64,
    /// Mean rating rounded to two decimals; 0 when no feedback exists.
    pub average_rating: f64,
    /// One bucket per rating value 1 through 5, zero counts included.
    pub distribution: Vec<RatingBucket>,
}
