//! Event domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Workshop,
    Seminar,
    Fest,
    Hackathon,
    TechTalk,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workshop => "WORKSHOP",
            Self::Seminar => "SEMINAR",
            Self::Fest => "FEST",
            Self::Hackathon => "HACKATHON",
            Self::TechTalk => "TECH_TALK",
        }
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORKSHOP" => Ok(Self::Workshop),
            "SEMINAR" => Ok(Self::Seminar),
            "FEST" => Ok(Self::Fest),
            "HACKATHON" => Ok(Self::Hackathon),
            "TECH_TALK" => Ok(Self::TechTalk),
            other => Err(format!("Unknown event category: {}", other)),
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event lifecycle status. Events start ACTIVE and may be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("Unknown event status: {}", other)),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event owned by a college.
///
/// `college_id` is immutable after creation; admins may only manage events
/// belonging to their own college.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub category: EventCategory,
    /// Maximum registrations accepted; unbounded when `None`.
    pub max_capacity: Option<i32>,
    pub allow_other_colleges: bool,
    pub status: EventStatus,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to create an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 200, message = "Venue is required"))]
    pub venue: String,

    pub category: EventCategory,

    #[validate(range(min = 1, message = "maxCapacity must be a positive integer"))]
    pub max_capacity: Option<i32>,

    #[serde(default)]
    pub allow_other_colleges: bool,
}

/// Request to update an event. All fields optional; college is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 200, message = "Venue must not be empty"))]
    pub venue: Option<String>,

    pub category: Option<EventCategory>,

    #[validate(range(min = 1, message = "maxCapacity must be a positive integer"))]
    pub max_capacity: Option<i32>,

    pub allow_other_colleges: Option<bool>,
}

/// Query filters for the event list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub college_id: Option<Uuid>,
    pub category: Option<EventCategory>,
    /// Only events dated today or later.
    pub upcoming: Option<bool>,
}

/// Event with its registration count, the common read shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub registration_count: i64,
}

/// Capacity snapshot for an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCapacity {
    pub event_id: Uuid,
    pub max_capacity: Option<i32>,
    pub registration_count: i64,
    /// Remaining seats; `None` when capacity is unbounded.
    pub available_spots: Option<i64>,
    pub is_full: bool,
}

impl EventCapacity {
    pub fn new(event_id: Uuid, max_capacity: Option<i32>, registration_count: i64) -> Self {
        let available_spots =
            max_capacity.map(|cap| (i64::from(cap) - registration_count).max(0));
        let is_full = available_spots == Some(0);
        Self {
            event_id,
            max_capacity,
            registration_count,
            available_spots,
            is_full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            EventCategory::Workshop,
            EventCategory::Seminar,
            EventCategory::Fest,
            EventCategory::Hackathon,
            EventCategory::TechTalk,
        ] {
            assert_eq!(category.as_str().parse::<EventCategory>(), Ok(category));
        }
        assert!("CONCERT".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_category_json_uses_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&EventCategory::TechTalk).unwrap(),
            "\"TECH_TALK\""
        );
        assert_eq!(
            serde_json::from_str::<EventCategory>("\"HACKATHON\"").unwrap(),
            EventCategory::Hackathon
        );
    }

    #[test]
    fn test_create_event_request_validation() {
        let valid: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Rust Workshop",
            "date": "2026-09-15T10:00:00Z",
            "venue": "Main Hall",
            "category": "WORKSHOP",
            "maxCapacity": 50
        }))
        .unwrap();
        assert!(valid.validate().is_ok());
        assert!(!valid.allow_other_colleges);

        let zero_capacity: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Rust Workshop",
            "date": "2026-09-15T10:00:00Z",
            "venue": "Main Hall",
            "category": "WORKSHOP",
            "maxCapacity": 0
        }))
        .unwrap();
        assert!(zero_capacity.validate().is_err());
    }

    #[test]
    fn test_capacity_snapshot() {
        let id = Uuid::new_v4();

        let unbounded = EventCapacity::new(id, None, 10);
        assert!(!unbounded.is_full);
        assert_eq!(unbounded.available_spots, None);

        let open = EventCapacity::new(id, Some(50), 10);
        assert_eq!(open.available_spots, Some(40));
        assert!(!open.is_full);

        let full = EventCapacity::new(id, Some(10), 10);
        assert_eq!(full.available_spots, Some(0));
        assert!(full.is_full);

        // Over-capacity snapshots clamp to zero rather than going negative.
        let over = EventCapacity::new(id, Some(10), 12);
        assert_eq!(over.available_spots, Some(0));
        assert!(over.is_full);
    }
}
