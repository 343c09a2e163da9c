//! College endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::college::{
    College, CollegeDetail, CollegeSummary, CreateCollegeRequest, UpdateCollegeRequest,
};
use persistence::repositories::CollegeRepository;
use shared::validation::normalize_email_domain;

/// Create a new college.
///
/// POST /api/colleges
pub async fn create_college(
    State(state): State<AppState>,
    Json(request): Json<CreateCollegeRequest>,
) -> Result<(StatusCode, Json<College>), ApiError> {
    request.validate()?;

    let email_domain = normalize_email_domain(&request.email_domain);

    let college_repo = CollegeRepository::new(state.pool.clone());
    let college: College = college_repo
        .create(&request.name, &email_domain)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict(
                "A college with this name or email domain already exists".to_string(),
            ),
            other => other,
        })?
        .into();

    info!(college_id = %college.id, name = %college.name, "College created");

    Ok((StatusCode::CREATED, Json(college)))
}

/// List all colleges with their student and event counts.
///
/// GET /api/colleges
pub async fn list_colleges(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollegeSummary>>, ApiError> {
    let college_repo = CollegeRepository::new(state.pool.clone());
    let entities = college_repo.list_with_counts().await?;

    let colleges = entities
        .into_iter()
        .map(|e| CollegeSummary {
            college: College {
                id: e.id,
                name: e.name,
                email_domain: e.email_domain,
                created_at: e.created_at,
            },
            student_count: e.student_count,
            event_count: e.event_count,
        })
        .collect();

    Ok(Json(colleges))
}

/// Get a college with its students and events.
///
/// GET /api/colleges/:id
pub async fn get_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CollegeDetail>, ApiError> {
    let college_repo = CollegeRepository::new(state.pool.clone());

    let college: College = college_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("College not found".to_string()))?
        .into();

    let students = college_repo
        .students_of(id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let events = college_repo
        .events_of(id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(CollegeDetail {
        college,
        students,
        events,
    }))
}

/// Update a college (partial update).
///
/// PUT /api/colleges/:id
pub async fn update_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCollegeRequest>,
) -> Result<Json<College>, ApiError> {
    request.validate()?;

    let email_domain = request.email_domain.as_deref().map(normalize_email_domain);

    let college_repo = CollegeRepository::new(state.pool.clone());
    let college: College = college_repo
        .update(id, request.name.as_deref(), email_domain.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("College not found".to_string()))?
        .into();

    info!(college_id = %college.id, "College updated");

    Ok(Json(college))
}

/// Delete a college.
///
/// DELETE /api/colleges/:id
///
/// Blocked while the college still owns students or events.
pub async fn delete_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let college_repo = CollegeRepository::new(state.pool.clone());

    if college_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("College not found".to_string()));
    }

    let (student_count, event_count) = college_repo.dependent_counts(id).await?;
    if student_count > 0 || event_count > 0 {
        return Err(ApiError::Conflict(format!(
            "Cannot delete college with {} students and {} events",
            student_count, event_count
        )));
    }

    college_repo.delete(id).await?;

    info!(college_id = %id, "College deleted");

    Ok(StatusCode::NO_CONTENT)
}
