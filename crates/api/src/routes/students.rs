//! Student endpoint handlers.
//!
//! Admin management routes plus the student-self routes backing the mobile
//! app (browse events, register, check in, leave feedback).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use crate::middleware::record_attendance_marked;
use crate::routes::auth::{create_unverified_student, MessageResponse};
use crate::routes::registrations::register_student;
use domain::models::attendance::Attendance;
use domain::models::event::Event;
use domain::models::feedback::{Feedback, StudentFeedbackRequest};
use domain::models::registration::Registration;
use domain::models::student::{
    generate_verification_token, CreateStudentRequest, Student, StudentEventView, StudentFilter,
};
use domain::services::attendance_rules::{check_attendance, AttendanceDenial};
use domain::services::feedback_rules::{check_feedback, FeedbackDenial};
use persistence::repositories::{
    AttendanceRepository, EventRepository, FeedbackRepository, RegistrationRepository,
    StudentRepository,
};

/// Create a student account (admin).
///
/// POST /api/students
///
/// Follows the same path as self-registration: the account starts unverified
/// and the verification token is emailed to the student.
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    request.validate()?;

    let student = create_unverified_student(&state, &request).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// List students, optionally filtered by college.
///
/// GET /api/students?collegeId=
pub async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());
    let entities = student_repo.list(filter.college_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get a single student.
///
/// GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());
    let student: Student = student_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?
        .into();

    Ok(Json(student))
}

/// Request body for student verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStudentRequest {
    pub verification_token: String,
}

/// Verify a student with their emailed token.
///
/// PATCH /api/students/:id/verify
///
/// The token is single-use; a verified account has none left, so repeat
/// verification fails the same way a wrong token does.
pub async fn verify_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VerifyStudentRequest>,
) -> Result<Json<Student>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());

    student_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let student: Student = student_repo
        .verify_with_token(id, &request.verification_token)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid verification token".to_string()))?
        .into();

    info!(student_id = %id, "Student verified");

    Ok(Json(student))
}

/// Resend the verification email for a student (admin).
///
/// POST /api/students/:id/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());

    let student = student_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if student.is_verified {
        return Err(ApiError::Validation(
            "Email is already verified".to_string(),
        ));
    }

    let token = generate_verification_token();
    student_repo.set_verification_token(id, &token).await?;

    state
        .email
        .send_verification_email(&student.email, &student.name, &token)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    Ok(Json(MessageResponse {
        message: "Verification email sent".to_string(),
    }))
}

/// Delete a student and everything that hangs off them.
///
/// DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());

    let deleted = student_repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Student not found".to_string()));
    }

    info!(student_id = %id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Events visible to the authenticated student, with their registration,
/// attendance, and feedback status on each.
///
/// GET /api/students/me/events
pub async fn my_events(
    identity: AuthIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentEventView>>, ApiError> {
    let student_id = identity.student_id()?;

    let student_repo = StudentRepository::new(state.pool.clone());
    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let entities = student_repo
        .events_for_student(student_id, student.college_id)
        .await?;

    Ok(Json(
        entities.into_iter().map(|e| e.into_view()).collect(),
    ))
}

/// Register the authenticated student for an event.
///
/// POST /api/students/events/:id/register
pub async fn register_for_event(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let student_id = identity.student_id()?;

    let registration = register_student(&state, student_id, event_id).await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Self check-in for the authenticated student.
///
/// POST /api/students/events/:id/attendance
pub async fn mark_my_attendance(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Attendance>), ApiError> {
    let student_id = identity.student_id()?;

    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let attendance_repo = AttendanceRepository::new(state.pool.clone());

    let registration = registration_repo
        .find_by_student_event(student_id, event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let event: Event = event_repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let already_marked = attendance_repo
        .exists_for_registration(registration.id)
        .await?;

    check_attendance(event.date, Utc::now(), already_marked).map_err(|d| match d {
        AttendanceDenial::AlreadyMarked => ApiError::Conflict(d.to_string()),
        AttendanceDenial::NotEventDay => ApiError::Validation(d.to_string()),
    })?;

    let attendance: Attendance = attendance_repo
        .create_guarded(registration.id)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict(AttendanceDenial::AlreadyMarked.to_string())
        })?
        .into();

    record_attendance_marked();
    info!(attendance_id = %attendance.id, student_id = %student_id, "Student checked in");

    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Feedback submission for the authenticated student.
///
/// POST /api/students/events/:id/feedback
pub async fn submit_my_feedback(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<StudentFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    request.validate()?;

    let student_id = identity.student_id()?;

    let registration_repo = RegistrationRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());
    let feedback_repo = FeedbackRepository::new(state.pool.clone());

    let registration = registration_repo
        .find_by_student_event(student_id, event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let event: Event = event_repo
        .find_by_id(event_id)
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
            ApiError::Conflict(FeedbackDenial::AlreadySubmitted.to_string())
        })?
        .into();

    info!(feedback_id = %feedback.id, student_id = %student_id, "Feedback submitted");

    Ok((StatusCode::CREATED, Json(feedback)))
}

pub(crate) fn feedback_denial_to_error(denial: FeedbackDenial) -> ApiError {
    match denial {
        FeedbackDenial::AlreadySubmitted => ApiError::Conflict(denial.to_string()),
        _ => ApiError::Validation(denial.to_string()),
    }
}
