//! Feedback endpoint handlers (admin).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::students::feedback_denial_to_error;
use domain::models::event::Event;
use domain::models::feedback::{
    Feedback, FeedbackDetail, FeedbackStats, RatingBucket, SubmitFeedbackRequest,
    UpdateFeedbackRequest,
};
use domain::services::feedback_rules::{check_feedback, FeedbackDenial};
use domain::services::reporting::average_rating;
use persistence::repositories::{EventRepository, FeedbackRepository, RegistrationRepository};

/// Submit feedback for a registration.
///
/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    request.validate()?;

    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let feedback_repo = FeedbackRepository::new(state.pool.clone());

    let registration = registration_repo
        .find_by_id(request.registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let event: Event = event_repo
        .find_by_id(registration.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let has_attendance = registration_repo.has_attendance(registration.id).await?;
    let already_submitted = feedback_repo
        .exists_for_registration(registration.id)
        .await?;

    check_feedback(
        request.rating,
        has_attendance,
        event.date,
        Utc::now(),
        already_submitted,
    )
    .map_err(feedback_denial_to_error)?;

    let feedback: Feedback = feedback_repo
        .create_guarded(registration.id, request.rating, request.comments.as_deref())
        .await?
        .ok_or_else(|| {
            feedback_denial_to_error(FeedbackDenial::AlreadySubmitted)
        })?
        .into();

    info!(
        feedback_id = %feedback.id,
        registration_id = %registration.id,
        "Feedback submitted"
    );

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// List feedback for an event.
///
/// GET /api/feedback/event/:event_id
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<FeedbackDetail>>, ApiError> {
    let feedback_repo = FeedbackRepository::new(state.pool.clone());
    let entities = feedback_repo.list_by_event(event_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Aggregate feedback statistics for an event.
///
/// GET /api/feedback/:id/stats
pub async fn feedback_stats(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<FeedbackStats>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let feedback_repo = FeedbackRepository::new(state.pool.clone());

    if event_repo.find_by_id(event_id).await?.is_none() {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    let (feedback_count, rating_sum) = feedback_repo.totals_for_event(event_id).await?;
    let counted = feedback_repo.distribution_for_event(event_id).await?;

    // Present every rating value, zeroes included.
    let distribution = (1..=5)
        .map(|rating| RatingBucket {
            rating,
            count: counted
                .iter()
                .find(|c| c.rating == rating)
                .map(|c| c.count)
                .unwrap_or(0),
        })
        .collect();

    Ok(Json(FeedbackStats {
        event_id,
        feedback_count,
        average_rating: average_rating(rating_sum, feedback_count),
        distribution,
    }))
}

/// Update a feedback entry.
///
/// PUT /api/feedback/:id
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFeedbackRequest>,
) -> Result<Json<Feedback>, ApiError> {
    request.validate()?;

    let feedback_repo = FeedbackRepository::new(state.pool.clone());
    let feedback: Feedback = feedback_repo
        .update(id, request.rating, request.comments.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?
        .into();

    info!(feedback_id = %id, "Feedback updated");

    Ok(Json(feedback))
}

/// Delete a feedback entry.
///
/// DELETE /api/feedback/:id
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let feedback_repo = FeedbackRepository::new(state.pool.clone());

    let deleted = feedback_repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Feedback not found".to_string()));
    }

    info!(feedback_id = %id, "Feedback deleted");

    Ok(StatusCode::NO_CONTENT)
}
