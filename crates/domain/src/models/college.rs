//! College domain models.
//!
//! A college owns students and events. Its email domain constrains which
//! student email addresses it accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A college that owns students and events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: Uuid,
    pub name: String,
    /// Email domain with leading `@`, e.g. `@acme.edu`.
    pub email_domain: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a college.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollegeRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = shared::validation::validate_email_domain))]
    pub email_domain: String,
}

/// Request to update a college. Both fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollegeRequest {
    #[validate(length(min = 1, max = 200, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(custom(function = shared::validation::validate_email_domain))]
    pub email_domain: Option<String>,
}

/// College with dependent counts, used by the list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSummary {
    #[serde(flatten)]
    pub college: College,
    pub student_count: i64,
    pub event_count: i64,
}

/// College detail with nested students and events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeDetail {
    #[serde(flatten)]
    pub college: College,
    pub students: Vec<super::student::Student>,
    pub events: Vec<super::event::EventSummary>,
}
