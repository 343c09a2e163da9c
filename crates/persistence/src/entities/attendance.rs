//! Attendance entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::attendance::AttendanceDetail;
use domain::models::Attendance;

/// Database row mapping for the attendance table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

impl From<AttendanceEntity> for Attendance {
    fn from(entity: AttendanceEntity) -> Self {
        Attendance {
            id: entity.id,
            registration_id: entity.registration_id,
            checked_in_at: entity.checked_in_at,
        }
    }
}

/// Attendance row joined with student and event info for listings.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDetailEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
    pub student_id: Uuid,
    pub student_name: String,
    pub event_id: Uuid,
    pub event_title: String,
}

impl From<AttendanceDetailEntity> for AttendanceDetail {
    fn from(entity: AttendanceDetailEntity) -> Self {
        AttendanceDetail {
            attendance: Attendance {
                id: entity.id,
                registration_id: entity.registration_id,
                checked_in_at: entity.checked_in_at,
            },
            student_id: entity.student_id,
            student_name: entity.student_name,
            event_id: entity.event_id,
            event_title: entity.event_title,
        }
    }
}
