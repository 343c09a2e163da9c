//! Registration endpoint handlers.
//!
//! Eligibility is checked twice: once in the domain rules for a precise
//! denial message, and again inside the guarded insert so concurrent
//! requests cannot oversubscribe an event.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use crate::middleware::record_registration_created;
use domain::models::event::Event;
use domain::models::registration::{CreateRegistrationRequest, Registration, RegistrationDetail};
use domain::services::registration_rules::{check_registration, RegistrationDenial};
use persistence::repositories::{EventRepository, RegistrationRepository, StudentRepository};

/// Register a student for an event.
///
/// POST /api/registrations (student mobile; self only)
pub async fn create_registration(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    if request.student_id != identity.student_id()? {
        return Err(ApiError::Forbidden(
            "You can only register yourself for events".to_string(),
        ));
    }

    let registration = register_student(&state, request.student_id, request.event_id).await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// List registrations for an event, with joined student and event info.
///
/// GET /api/registrations/event/:event_id
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationDetail>>, ApiError> {
    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let entities = registration_repo.list_by_event(event_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// List registrations for a student.
///
/// GET /api/registrations/student/:student_id
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationDetail>>, ApiError> {
    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let entities = registration_repo.list_by_student(student_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get a single registration with its lifecycle flags.
///
/// GET /api/registrations/:id
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationDetail>, ApiError> {
    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let entity = registration_repo
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// Cancel a registration.
///
/// DELETE /api/registrations/:id
///
/// Refused once attendance has been marked or the event has passed.
pub async fn cancel_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());

    let registration = registration_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    if registration_repo.has_attendance(id).await? {
        return Err(ApiError::Validation(
            "Cannot cancel a registration after attendance has been marked".to_string(),
        ));
    }

    let event: Event = event_repo
        .find_by_id(registration.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if event.date < Utc::now() {
        return Err(ApiError::Validation(
            "Cannot cancel a registration for a past event".to_string(),
        ));
    }

    registration_repo.delete(id).await?;

    info!(registration_id = %id, "Registration cancelled");

    Ok(StatusCode::NO_CONTENT)
}

/// Shared registration path for the direct endpoint and the student-self
/// route.
///
/// Runs the eligibility rules against a snapshot, then relies on the guarded
/// insert for the race-free capacity and uniqueness check. A `None` from the
/// insert is re-read to report the right denial.
pub(crate) async fn register_student(
    state: &AppState,
    student_id: Uuid,
    event_id: Uuid,
) -> Result<Registration, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let registration_repo = RegistrationRepository::new(state.pool.clone());

    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let event: Event = event_repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let current_count = event_repo.registration_count(event_id).await?;
    let already_registered = registration_repo.exists(student_id, event_id).await?;

    check_registration(student.college_id, &event, current_count, already_registered)
        .map_err(denial_to_error)?;

    let registration: Registration = match registration_repo
        .create_guarded(student_id, event_id)
        .await?
    {
        Some(entity) => entity.into(),
        // A concurrent request won the race; classify which guard fired.
        None => {
            if registration_repo.exists(student_id, event_id).await? {
                return Err(denial_to_error(RegistrationDenial::AlreadyRegistered));
            }
            return Err(denial_to_error(RegistrationDenial::EventFull));
        }
    };

    record_registration_created();
    info!(
        registration_id = %registration.id,
        student_id = %student_id,
        event_id = %event_id,
        "Registration created"
    );

    Ok(registration)
}

fn denial_to_error(denial: RegistrationDenial) -> ApiError {
    match denial {
        RegistrationDenial::AlreadyRegistered => ApiError::Conflict(denial.to_string()),
        _ => ApiError::Validation(denial.to_string()),
    }
}
