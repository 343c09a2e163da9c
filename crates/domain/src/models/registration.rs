//! Registration domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student's claim on a seat at an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub student_id: Uuid,
    pub event_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

/// Request to create a registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub student_id: Uuid,
    pub event_id: Uuid,
}

/// Student info joined onto a registration row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStudent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Event info joined onto a registration row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEvent {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub venue: String,
}

/// Registration with joined student and event data, plus lifecycle flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetail {
    #[serde(flatten)]
    pub registration: Registration,
    pub student: RegistrationStudent,
    pub event: RegistrationEvent,
    pub has_attended: bool,
    pub has_feedback: bool,
}
