//! Registration entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::registration::{
    RegistrationDetail, RegistrationEvent, RegistrationStudent,
};
use domain::models::Registration;

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub event_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Registration {
            id: entity.id,
            student_id: entity.student_id,
            event_id: entity.event_id,
            registered_at: entity.registered_at,
        }
    }
}

/// Registration row joined with student/event info and lifecycle flags.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetailEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub event_id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub student_name: String,
    pub student_email: String,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_venue: String,
    pub has_attended: bool,
    pub has_feedback: bool,
}

impl From<RegistrationDetailEntity> for RegistrationDetail {
    fn from(entity: RegistrationDetailEntity) -> Self {
        RegistrationDetail {
            registration: Registration {
                id: entity.id,
                student_id: entity.student_id,
                event_id: entity.event_id,
                registered_at: entity.registered_at,
            },
            student: RegistrationStudent {
                id: entity.student_id,
                name: entity.student_name,
                email: entity.student_email,
            },
            event: RegistrationEvent {
                id: entity.event_id,
                title: entity.event_title,
                date: entity.event_date,
                venue: entity.event_venue,
            },
            has_attended: entity.has_attended,
            has_feedback: entity.has_feedback,
        }
    }
}
