//! Report endpoint handlers.
//!
//! Reports are computed fresh from SQL aggregates on every call; percentages
//! and averages are rounded in the domain layer so every endpoint agrees on
//! the arithmetic.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::report::{
    AttendancePercentageEntry, AverageFeedbackEntry, EventPopularityEntry, OverallStats,
    ReportFilter, StudentParticipationEntry, TopActiveStudentEntry,
};
use domain::services::reporting::{attendance_percentage, average_rating};
use persistence::entities::EventCategoryDb;
use persistence::repositories::{ReportRepository, DEFAULT_REPORT_LIMIT, DEFAULT_TOP_STUDENTS_LIMIT};

/// Events ranked by registration count.
///
/// GET /api/reports/event-popularity
pub async fn event_popularity(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<EventPopularityEntry>>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let entities = report_repo
        .event_popularity(
            filter.college_id,
            filter.category.map(EventCategoryDb::from),
            filter.limit.unwrap_or(DEFAULT_REPORT_LIMIT),
        )
        .await?;

    let entries = entities
        .into_iter()
        .map(|e| EventPopularityEntry {
            event_id: e.event_id,
            title: e.title,
            category: e.category.into(),
            college_name: e.college_name,
            registration_count: e.registration_count,
        })
        .collect();

    Ok(Json(entries))
}

/// Per-student registration and attendance counts.
///
/// GET /api/reports/student-participation
pub async fn student_participation(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<StudentParticipationEntry>>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let entities = report_repo
        .student_participation(
            filter.college_id,
            filter.limit.unwrap_or(DEFAULT_REPORT_LIMIT),
        )
        .await?;

    let entries = entities
        .into_iter()
        .map(|e| StudentParticipationEntry {
            student_id: e.student_id,
            name: e.name,
            email: e.email,
            events_registered: e.events_registered,
            events_attended: e.events_attended,
            attendance_rate: attendance_percentage(e.events_attended, e.events_registered),
        })
        .collect();

    Ok(Json(entries))
}

/// Students ranked by attendance count.
///
/// GET /api/reports/top-active-students
pub async fn top_active_students(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<TopActiveStudentEntry>>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let entities = report_repo
        .top_active_students(
            filter.college_id,
            filter.limit.unwrap_or(DEFAULT_TOP_STUDENTS_LIMIT),
        )
        .await?;

    let entries = entities
        .into_iter()
        .map(|e| TopActiveStudentEntry {
            student_id: e.student_id,
            name: e.name,
            email: e.email,
            attendance_count: e.attendance_count,
        })
        .collect();

    Ok(Json(entries))
}

/// Per-event attendance percentages.
///
/// GET /api/reports/attendance-percentage
pub async fn attendance_percentages(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<AttendancePercentageEntry>>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let entities = report_repo
        .attendance_counts(filter.college_id, filter.event_id)
        .await?;

    let entries = entities
        .into_iter()
        .map(|e| AttendancePercentageEntry {
            event_id: e.event_id,
            title: e.title,
            registered: e.registered,
            attended: e.attended,
            attendance_percentage: attendance_percentage(e.attended, e.registered),
        })
        .collect();

    Ok(Json(entries))
}

/// Per-event average feedback ratings.
///
/// GET /api/reports/average-feedback
pub async fn average_feedback(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<AverageFeedbackEntry>>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let entities = report_repo
        .feedback_averages(filter.college_id, filter.event_id)
        .await?;

    let entries = entities
        .into_iter()
        .map(|e| AverageFeedbackEntry {
            event_id: e.event_id,
            title: e.title,
            feedback_count: e.feedback_count,
            average_rating: average_rating(e.rating_sum, e.feedback_count),
        })
        .collect();

    Ok(Json(entries))
}

/// Platform-wide totals.
///
/// GET /api/reports/overall-stats
pub async fn overall_stats(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<OverallStats>, ApiError> {
    let report_repo = ReportRepository::new(state.pool.clone());
    let counts = report_repo.overall_counts(filter.college_id).await?;

    Ok(Json(OverallStats {
        total_colleges: counts.total_colleges,
        total_students: counts.total_students,
        total_events: counts.total_events,
        total_registrations: counts.total_registrations,
        total_attendance: counts.total_attendance,
        total_feedback: counts.total_feedback,
        overall_attendance_percentage: attendance_percentage(
            counts.total_attendance,
            counts.total_registrations,
        ),
    }))
}
