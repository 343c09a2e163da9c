//! Business rule engines.
//!
//! Each engine is a pure function over entity state; handlers read the state,
//! run the check, then perform the persistence write. Duplicate and capacity
//! races are additionally closed at the database layer with unique
//! constraints and guarded inserts, so these checks give early, well-typed
//! denials rather than being the only line of defense.

pub mod attendance_rules;
pub mod feedback_rules;
pub mod registration_rules;
pub mod reporting;

pub use attendance_rules::{check_attendance, AttendanceDenial};
pub use feedback_rules::{check_feedback, FeedbackDenial};
pub use registration_rules::{check_registration, RegistrationDenial};
