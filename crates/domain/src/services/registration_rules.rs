//! Registration eligibility rules.

use thiserror::Error;
use uuid::Uuid;

use crate::models::event::{Event, EventStatus};

/// Reasons a registration attempt is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationDenial {
    #[error("Event is not active")]
    EventNotActive,

    #[error("Event has reached maximum capacity")]
    EventFull,

    #[error("Student is already registered for this event")]
    AlreadyRegistered,

    #[error("Student's college does not match the event's college")]
    CollegeMismatch,
}

/// Decide whether a student may register for an event.
///
/// Checks run in a fixed order: status, capacity, duplicate, eligibility.
/// `current_count` is the registration count read at validation time; the
/// database-level guarded insert re-enforces capacity and uniqueness
/// atomically, so passing here is necessary but not sufficient.
pub fn check_registration(
    student_college_id: Uuid,
    event: &Event,
    current_count: i64,
    already_registered: bool,
) -> Result<(), RegistrationDenial> {
    if event.status != EventStatus::Active {
        return Err(RegistrationDenial::EventNotActive);
    }

    if let Some(max_capacity) = event.max_capacity {
        if current_count >= i64::from(max_capacity) {
            return Err(RegistrationDenial::EventFull);
        }
    }

    if already_registered {
        return Err(RegistrationDenial::AlreadyRegistered);
    }

    if student_college_id != event.college_id && !event.allow_other_colleges {
        return Err(RegistrationDenial::CollegeMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventCategory;
    use chrono::Utc;

    fn event(college_id: Uuid) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Rust Workshop".to_string(),
            description: None,
            date: Utc::now(),
            venue: "Main Hall".to_string(),
            category: EventCategory::Workshop,
            max_capacity: Some(100),
            allow_other_colleges: false,
            status: EventStatus::Active,
            college_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_allows_same_college_with_room() {
        let college = Uuid::new_v4();
        assert_eq!(check_registration(college, &event(college), 0, false), Ok(()));
    }

    #[test]
    fn test_denies_cancelled_event() {
        let college = Uuid::new_v4();
        let mut ev = event(college);
        ev.status = EventStatus::Cancelled;
        assert_eq!(
            check_registration(college, &ev, 0, false),
            Err(RegistrationDenial::EventNotActive)
        );
    }

    #[test]
    fn test_denies_full_event() {
        let college = Uuid::new_v4();
        let mut ev = event(college);
        ev.max_capacity = Some(10);
        assert_eq!(
            check_registration(college, &ev, 10, false),
            Err(RegistrationDenial::EventFull)
        );
        // Boundary: one seat left still admits.
        assert_eq!(check_registration(college, &ev, 9, false), Ok(()));
    }

    #[test]
    fn test_unbounded_capacity_never_full() {
        let college = Uuid::new_v4();
        let mut ev = event(college);
        ev.max_capacity = None;
        assert_eq!(check_registration(college, &ev, 1_000_000, false), Ok(()));
    }

    #[test]
    fn test_denies_duplicate() {
        let college = Uuid::new_v4();
        assert_eq!(
            check_registration(college, &event(college), 5, true),
            Err(RegistrationDenial::AlreadyRegistered)
        );
    }

    #[test]
    fn test_denies_other_college() {
        let ev = event(Uuid::new_v4());
        assert_eq!(
            check_registration(Uuid::new_v4(), &ev, 0, false),
            Err(RegistrationDenial::CollegeMismatch)
        );
    }

    #[test]
    fn test_allows_other_college_when_open() {
        let mut ev = event(Uuid::new_v4());
        ev.allow_other_colleges = true;
        assert_eq!(check_registration(Uuid::new_v4(), &ev, 0, false), Ok(()));
    }

    #[test]
    fn test_capacity_checked_before_duplicate() {
        // A full event reports EventFull even for a student who is already
        // registered, matching the fixed check order.
        let college = Uuid::new_v4();
        let mut ev = event(college);
        ev.max_capacity = Some(1);
        assert_eq!(
            check_registration(college, &ev, 1, true),
            Err(RegistrationDenial::EventFull)
        );
    }

    #[test]
    fn test_status_checked_before_capacity() {
        let college = Uuid::new_v4();
        let mut ev = event(college);
        ev.status = EventStatus::Cancelled;
        ev.max_capacity = Some(1);
        assert_eq!(
            check_registration(college, &ev, 1, false),
            Err(RegistrationDenial::EventNotActive)
        );
    }
}
