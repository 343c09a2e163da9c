//! Attendance endpoint handlers (admin).

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
use crate::middleware::record_attendance_marked;
use domain::models::attendance::{
    Attendance, AttendanceDetail, BulkAttendanceOutcome, BulkAttendanceRequest,
    BulkAttendanceResponse, MarkAttendanceRequest,
};
use domain::models::event::Event;
use domain::services::attendance_rules::{check_attendance, AttendanceDenial};
use persistence::repositories::{AttendanceRepository, EventRepository, RegistrationRepository};

/// Mark attendance for a single registration.
///
/// POST /api/attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<(StatusCode, Json<Attendance>), ApiError> {
    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let attendance_repo = AttendanceRepository::new(state.pool.clone());

    let registration = registration_repo
        .find_by_id(request.registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let event: Event = event_repo
        .find_by_id(registration.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let already_marked = attendance_repo
        .exists_for_registration(registration.id)
        .await?;

    check_attendance(event.date, Utc::now(), already_marked).map_err(denial_to_error)?;

    let attendance: Attendance = attendance_repo
        .create_guarded(registration.id)
        .await?
        .ok_or_else(|| denial_to_error(AttendanceDenial::AlreadyMarked))?
        .into();

    record_attendance_marked();
    info!(
        attendance_id = %attendance.id,
        registration_id = %registration.id,
        "Attendance marked"
    );

    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Mark attendance for many students of one event.
///
/// POST /api/attendance/bulk
///
/// Each student is processed independently; failed entries report a reason
/// and never roll back the ones already marked.
pub async fn bulk_mark_attendance(
    State(state): State<AppState>,
    Json(request): Json<BulkAttendanceRequest>,
) -> Result<Json<BulkAttendanceResponse>, ApiError> {
    request.validate()?;

    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let attendance_repo = AttendanceRepository::new(state.pool.clone());

    let event: Event = event_repo
        .find_by_id(request.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let now = Utc::now();
    let mut results = Vec::with_capacity(request.student_ids.len());
    let mut marked = 0;

    for student_id in request.student_ids {
        let outcome = mark_one(
            &registration_repo,
            &attendance_repo,
            &event,
            student_id,
            now,
        )
        .await?;

        if outcome.success {
            marked += 1;
            record_attendance_marked();
        }
        results.push(outcome);
    }

    let failed = results.len() - marked;

    info!(event_id = %event.id, marked, failed, "Bulk attendance processed");

    Ok(Json(BulkAttendanceResponse {
        marked,
        failed,
        results,
    }))
}

/// List attendance for an event.
///
/// GET /api/attendance/event/:event_id
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceDetail>>, ApiError> {
    let attendance_repo = AttendanceRepository::new(state.pool.clone());
    let entities = attendance_repo.list_by_event(event_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// List attendance for a student.
///
/// GET /api/attendance/student/:student_id
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceDetail>>, ApiError> {
    let attendance_repo = AttendanceRepository::new(state.pool.clone());
    let entities = attendance_repo.list_by_student(student_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Delete an attendance record.
///
/// DELETE /api/attendance/:id
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let attendance_repo = AttendanceRepository::new(state.pool.clone());

    let deleted = attendance_repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Attendance record not found".to_string()));
    }

    info!(attendance_id = %id, "Attendance record deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Process one student of a bulk request. Rule denials become per-item
/// failures; database errors still abort the whole request.
async fn mark_one(
    registration_repo: &RegistrationRepository,
    attendance_repo: &AttendanceRepository,
    event: &Event,
    student_id: Uuid,
    now: chrono::DateTime<Utc>,
) -> Result<BulkAttendanceOutcome, ApiError> {
    let registration = match registration_repo
        .find_by_student_event(student_id, event.id)
        .await?
    {
        Some(registration) => registration,
        None => {
            return Ok(BulkAttendanceOutcome {
                student_id,
                success: false,
                attendance_id: None,
                reason: Some("Student is not registered for this event".to_string()),
            })
        }
    };

    let already_marked = attendance_repo
        .exists_for_registration(registration.id)
        .await?;

    if let Err(denial) = check_attendance(event.date, now, already_marked) {
        return Ok(BulkAttendanceOutcome {
            student_id,
            success: false,
            attendance_id: None,
            reason: Some(denial.to_string()),
        });
    }

    match attendance_repo.create_guarded(registration.id).await? {
        Some(entity) => Ok(BulkAttendanceOutcome {
            student_id,
            success: true,
            attendance_id: Some(entity.id),
            reason: None,
        }),
        None => Ok(BulkAttendanceOutcome {
            student_id,
            success: false,
            attendance_id: None,
            reason: Some(AttendanceDenial::AlreadyMarked.to_string()),
        }),
    }
}

fn denial_to_error(denial: AttendanceDenial) -> ApiError {
    match denial {
        AttendanceDenial::AlreadyMarked => ApiError::Conflict(denial.to_string()),
        AttendanceDenial::NotEventDay => ApiError::Validation(denial.to_string()),
    }
}
