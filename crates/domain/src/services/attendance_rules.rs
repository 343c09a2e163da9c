//! Attendance window rules.
//!
//! Attendance can be marked only on the event's calendar day (UTC). The
//! same-day rule applies uniformly to the admin mark, bulk mark, and
//! student self-check-in paths.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons an attendance attempt is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttendanceDenial {
    #[error("Attendance has already been marked for this registration")]
    AlreadyMarked,

    #[error("Attendance can only be marked on the event day")]
    NotEventDay,
}

/// Decide whether attendance may be marked for a registration.
pub fn check_attendance(
    event_date: DateTime<Utc>,
    now: DateTime<Utc>,
    already_marked: bool,
) -> Result<(), AttendanceDenial> {
    if already_marked {
        return Err(AttendanceDenial::AlreadyMarked);
    }

    if now.date_naive() != event_date.date_naive() {
        return Err(AttendanceDenial::NotEventDay);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_allows_on_event_day() {
        let event = Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 9, 15, 23, 59, 59).unwrap();
        assert_eq!(check_attendance(event, now, false), Ok(()));
    }

    #[test]
    fn test_denies_day_before() {
        let event = Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0).unwrap();
        let now = event - Duration::days(1);
        assert_eq!(
            check_attendance(event, now, false),
            Err(AttendanceDenial::NotEventDay)
        );
    }

    #[test]
    fn test_denies_day_after() {
        let event = Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0).unwrap();
        let now = event + Duration::days(1);
        assert_eq!(
            check_attendance(event, now, false),
            Err(AttendanceDenial::NotEventDay)
        );
    }

    #[test]
    fn test_denies_duplicate_before_window() {
        // Duplicate wins over the window check even off the event day.
        let event = Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0).unwrap();
        let now = event + Duration::days(3);
        assert_eq!(
            check_attendance(event, now, true),
            Err(AttendanceDenial::AlreadyMarked)
        );
    }

    #[test]
    fn test_midnight_boundary() {
        let event = Utc.with_ymd_and_hms(2026, 9, 15, 23, 0, 0).unwrap();
        let just_after_midnight = Utc.with_ymd_and_hms(2026, 9, 16, 0, 0, 1).unwrap();
        assert_eq!(
            check_attendance(event, just_after_midnight, false),
            Err(AttendanceDenial::NotEventDay)
        );
    }
}
