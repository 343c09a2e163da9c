//! Event entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::event::EventSummary;
use domain::models::student::StudentEventView;
use domain::models::{Event, EventCategory, EventStatus};

/// Database enum for event_category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategoryDb {
    Workshop,
    Seminar,
    Fest,
    Hackathon,
    TechTalk,
}

impl From<EventCategoryDb> for EventCategory {
    fn from(db: EventCategoryDb) -> Self {
        match db {
            EventCategoryDb::Workshop => EventCategory::Workshop,
            EventCategoryDb::Seminar => EventCategory::Seminar,
            EventCategoryDb::Fest => EventCategory::Fest,
            EventCategoryDb::Hackathon => EventCategory::Hackathon,
            EventCategoryDb::TechTalk => EventCategory::TechTalk,
        }
    }
}

impl From<EventCategory> for EventCategoryDb {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Workshop => EventCategoryDb::Workshop,
            EventCategory::Seminar => EventCategoryDb::Seminar,
            EventCategory::Fest => EventCategoryDb::Fest,
            EventCategory::Hackathon => EventCategoryDb::Hackathon,
            EventCategory::TechTalk => EventCategoryDb::TechTalk,
        }
    }
}

/// Database enum for event_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "UPPERCASE")]
pub enum EventStatusDb {
    Active,
    Cancelled,
}

impl From<EventStatusDb> for EventStatus {
    fn from(db: EventStatusDb) -> Self {
        match db {
            EventStatusDb::Active => EventStatus::Active,
            EventStatusDb::Cancelled => EventStatus::Cancelled,
        }
    }
}

impl From<EventStatus> for EventStatusDb {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Active => EventStatusDb::Active,
            EventStatus::Cancelled => EventStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub category: EventCategoryDb,
    pub max_capacity: Option<i32>,
    pub allow_other_colleges: bool,
    pub status: EventStatusDb,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Event {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            date: entity.date,
            venue: entity.venue,
            category: entity.category.into(),
            max_capacity: entity.max_capacity,
            allow_other_colleges: entity.allow_other_colleges,
            status: entity.status.into(),
            college_id: entity.college_id,
            created_at: entity.created_at,
        }
    }
}

/// Event row with its registration count.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCountEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub category: EventCategoryDb,
    pub max_capacity: Option<i32>,
    pub allow_other_colleges: bool,
    pub status: EventStatusDb,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub registration_count: i64,
}

impl EventWithCountEntity {
    fn split(self) -> (Event, i64) {
        let count = self.registration_count;
        let event = Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
            venue: self.venue,
            category: self.category.into(),
            max_capacity: self.max_capacity,
            allow_other_colleges: self.allow_other_colleges,
            status: self.status.into(),
            college_id: self.college_id,
            created_at: self.created_at,
        };
        (event, count)
    }
}

impl From<EventWithCountEntity> for EventSummary {
    fn from(entity: EventWithCountEntity) -> Self {
        let (event, registration_count) = entity.split();
        EventSummary {
            event,
            registration_count,
        }
    }
}

/// Event row annotated with one student's relationship to it.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub category: EventCategoryDb,
    pub max_capacity: Option<i32>,
    pub allow_other_colleges: bool,
    pub status: EventStatusDb,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub registration_count: i64,
    pub is_registered: bool,
    pub has_attended: bool,
    pub has_feedback: bool,
}

impl StudentEventEntity {
    /// Convert to the view model, computing the `can_register` flag from the
    /// row snapshot.
    pub fn into_view(self) -> StudentEventView {
        let event = Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
            venue: self.venue,
            category: self.category.into(),
            max_capacity: self.max_capacity,
            allow_other_colleges: self.allow_other_colleges,
            status: self.status.into(),
            college_id: self.college_id,
            created_at: self.created_at,
        };

        let has_room = event
            .max_capacity
            .map_or(true, |cap| self.registration_count < i64::from(cap));
        let can_register =
            !self.is_registered && has_room && event.status == domain::models::EventStatus::Active;

        StudentEventView {
            event,
            registration_count: self.registration_count,
            is_registered: self.is_registered,
            has_attended: self.has_attended,
            has_feedback: self.has_feedback,
            can_register,
        }
    }
}
