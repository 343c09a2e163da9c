//! Feedback entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::feedback::FeedbackDetail;
use domain::models::Feedback;

/// Database row mapping for the feedback table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub rating: i32,
    pub comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<FeedbackEntity> for Feedback {
    fn from(entity: FeedbackEntity) -> Self {
        Feedback {
            id: entity.id,
            registration_id: entity.registration_id,
            rating: entity.rating,
            comments: entity.comments,
            submitted_at: entity.submitted_at,
        }
    }
}

/// Feedback row joined with student and event info for listings.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackDetailEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub rating: i32,
    pub comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub student_id: Uuid,
    pub student_name: String,
    pub event_id: Uuid,
    pub event_title: String,
}

impl From<FeedbackDetailEntity> for FeedbackDetail {
    fn from(entity: FeedbackDetailEntity) -> Self {
        FeedbackDetail {
            feedback: Feedback {
                id: entity.id,
                registration_id: entity.registration_id,
                rating: entity.rating,
                comments: entity.comments,
                submitted_at: entity.submitted_at,
            },
            student_id: entity.student_id,
            student_name: entity.student_name,
            event_id: entity.event_id,
            event_title: entity.event_title,
        }
    }
}

/// Count of feedback rows at one rating value.
#[derive(Debug, Clone, FromRow)]
pub struct RatingCountEntity {
    pub rating: i32,
    pub count: i64,
}
