//! College entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::College;

/// Database row mapping for the colleges table.
#[derive(Debug, Clone, FromRow)]
pub struct CollegeEntity {
    pub id: Uuid,
    pub name: String,
    pub email_domain: String,
    pub created_at: DateTime<Utc>,
}

impl From<CollegeEntity> for College {
    fn from(entity: CollegeEntity) -> Self {
        College {
            id: entity.id,
            name: entity.name,
            email_domain: entity.email_domain,
            created_at: entity.created_at,
        }
    }
}

/// College row with dependent counts for the list endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct CollegeWithCountsEntity {
    pub id: Uuid,
    pub name: String,
    pub email_domain: String,
    pub created_at: DateTime<Utc>,
    pub student_count: i64,
    pub event_count: i64,
}
