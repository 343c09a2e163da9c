//! Event endpoint handlers.
//!
//! All mutations are scoped to the admin's own college; the event's owning
//! college is set at creation time and never changes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use domain::models::event::{
    CreateEventRequest, Event, EventCapacity, EventFilter, EventStatus, EventSummary,
    UpdateEventRequest,
};
use persistence::entities::{EventCategoryDb, EventStatusDb};
use persistence::repositories::{EventRepository, RegistrationRepository};

/// Response for the feedback reminder endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminders_sent: usize,
}

/// Create a new event for the admin's college.
///
/// POST /api/events
pub async fn create_event(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventSummary>), ApiError> {
    request.validate()?;

    let college_id = identity.require_college()?;

    let event_repo = EventRepository::new(state.pool.clone());
    let event: Event = event_repo
        .create(
            &request.title,
            request.description.as_deref(),
            request.date,
            &request.venue,
            EventCategoryDb::from(request.category),
            request.max_capacity,
            request.allow_other_colleges,
            college_id,
        )
        .await?
        .into();

    info!(event_id = %event.id, college_id = %college_id, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(EventSummary {
            event,
            registration_count: 0,
        }),
    ))
}

/// List events, scoped to the admin's college unless a filter says otherwise.
///
/// GET /api/events?collegeId=&category=&upcoming=
pub async fn list_events(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<EventSummary>>, ApiError> {
    let college_id = match filter.college_id {
        Some(id) => Some(id),
        None => identity.college_id,
    };

    let event_repo = EventRepository::new(state.pool.clone());
    let entities = event_repo
        .list(
            college_id,
            filter.category.map(EventCategoryDb::from),
            filter.upcoming.unwrap_or(false),
        )
        .await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get a single event with its registration count.
///
/// GET /api/events/:id (public)
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventSummary>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let entity = event_repo
        .find_with_count(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// Update an event (partial update; owning college is immutable).
///
/// PUT /api/events/:id
pub async fn update_event(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    request.validate()?;

    let event_repo = EventRepository::new(state.pool.clone());
    check_ownership(&event_repo, id, &identity).await?;

    let event: Event = event_repo
        .update(
            id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.date,
            request.venue.as_deref(),
            request.category.map(EventCategoryDb::from),
            request.max_capacity,
            request.allow_other_colleges,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    info!(event_id = %event.id, "Event updated");

    Ok(Json(event))
}

/// Delete an event.
///
/// DELETE /api/events/:id
///
/// Blocked while registrations exist, mirroring the college delete guard;
/// cancel the event instead, or remove the registrations first.
pub async fn delete_event(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    check_ownership(&event_repo, id, &identity).await?;

    let registration_count = event_repo.registration_count(id).await?;
    if registration_count > 0 {
        return Err(ApiError::Conflict(format!(
            "Cannot delete an event with {} registrations",
            registration_count
        )));
    }

    event_repo.delete(id).await?;

    info!(event_id = %id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Cancel an event.
///
/// PUT /api/events/:id/cancel
pub async fn cancel_event(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    check_ownership(&event_repo, id, &identity).await?;

    let event: Event = event_repo
        .set_status(id, EventStatusDb::from(EventStatus::Cancelled))
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    info!(event_id = %event.id, "Event cancelled");

    Ok(Json(event))
}

/// Capacity snapshot for an event.
///
/// GET /api/events/:id/capacity (public)
pub async fn event_capacity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventCapacity>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let event = event_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let registration_count = event_repo.registration_count(id).await?;

    Ok(Json(EventCapacity::new(
        event.id,
        event.max_capacity,
        registration_count,
    )))
}

/// Send feedback reminders to attendees who have not left feedback yet.
///
/// POST /api/events/:id/send-feedback-reminders
pub async fn send_feedback_reminders(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let event = check_ownership(&event_repo, id, &identity).await?;

    if event.date > Utc::now() {
        return Err(ApiError::Validation(
            "Cannot send feedback reminders before the event takes place".to_string(),
        ));
    }

    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let registrations = registration_repo.list_by_event(id).await?;

    let mut reminders_sent = 0;
    for registration in registrations {
        if !registration.has_attended || registration.has_feedback {
            continue;
        }

        state
            .email
            .send_feedback_reminder(
                &registration.student_email,
                &registration.student_name,
                &event.title,
            )
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;
        reminders_sent += 1;
    }

    info!(event_id = %id, reminders_sent, "Feedback reminders sent");

    Ok(Json(ReminderResponse { reminders_sent }))
}

/// Load an event and verify the admin manages its college.
async fn check_ownership(
    event_repo: &EventRepository,
    event_id: Uuid,
    identity: &AuthIdentity,
) -> Result<Event, ApiError> {
    let event: Event = event_repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if event.college_id != identity.require_college()? {
        return Err(ApiError::Forbidden(
            "You can only manage events for your own college".to_string(),
        ));
    }

    Ok(event)
}
