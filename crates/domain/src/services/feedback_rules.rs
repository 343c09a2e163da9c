//! Feedback precondition rules.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons a feedback submission is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedbackDenial {
    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("Feedback requires attendance at the event")]
    NoAttendance,

    #[error("Feedback cannot be submitted before the event takes place")]
    EventInFuture,

    #[error("Feedback has already been submitted for this registration")]
    AlreadySubmitted,
}

/// Decide whether feedback may be submitted for a registration.
///
/// The rating check runs first so an out-of-range rating is rejected before
/// any persistence is attempted.
pub fn check_feedback(
    rating: i32,
    has_attendance: bool,
    event_date: DateTime<Utc>,
    now: DateTime<Utc>,
    already_submitted: bool,
) -> Result<(), FeedbackDenial> {
    if !(1..=5).contains(&rating) {
        return Err(FeedbackDenial::InvalidRating);
    }

    if !has_attendance {
        return Err(FeedbackDenial::NoAttendance);
    }

    if event_date > now {
        return Err(FeedbackDenial::EventInFuture);
    }

    if already_submitted {
        return Err(FeedbackDenial::AlreadySubmitted);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_allows_valid_submission() {
        let event = Utc::now() - Duration::hours(2);
        assert_eq!(check_feedback(4, true, event, Utc::now(), false), Ok(()));
    }

    #[test]
    fn test_denies_out_of_range_rating() {
        let event = Utc::now() - Duration::hours(2);
        for rating in [0, 6, -3] {
            assert_eq!(
                check_feedback(rating, true, event, Utc::now(), false),
                Err(FeedbackDenial::InvalidRating)
            );
        }
    }

    #[test]
    fn test_rating_checked_first() {
        // Invalid rating wins even when every other precondition also fails.
        let event = Utc::now() + Duration::days(1);
        assert_eq!(
            check_feedback(0, false, event, Utc::now(), true),
            Err(FeedbackDenial::InvalidRating)
        );
    }

    #[test]
    fn test_denies_without_attendance() {
        let event = Utc::now() - Duration::hours(2);
        assert_eq!(
            check_feedback(5, false, event, Utc::now(), false),
            Err(FeedbackDenial::NoAttendance)
        );
    }

    #[test]
    fn test_denies_future_event() {
        let event = Utc::now() + Duration::days(1);
        assert_eq!(
            check_feedback(5, true, event, Utc::now(), false),
            Err(FeedbackDenial::EventInFuture)
        );
    }

    #[test]
    fn test_denies_duplicate() {
        let event = Utc::now() - Duration::hours(2);
        assert_eq!(
            check_feedback(5, true, event, Utc::now(), true),
            Err(FeedbackDenial::AlreadySubmitted)
        );
    }
}
