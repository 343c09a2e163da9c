//! Student entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Student;

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<StudentEntity> for Student {
    fn from(entity: StudentEntity) -> Self {
        Student {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            is_verified: entity.is_verified,
            verification_token: entity.verification_token,
            college_id: entity.college_id,
            created_at: entity.created_at,
        }
    }
}
