//! Repository implementations for database access.
//!
//! Each repository is constructed with an explicit `PgPool`; nothing in this
//! crate reaches for a global client.

pub mod attendance;
pub mod college;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod report;
pub mod student;

pub use attendance::AttendanceRepository;
pub use college::CollegeRepository;
pub use event::EventRepository;
pub use feedback::FeedbackRepository;
pub use registration::RegistrationRepository;
pub use report::{ReportRepository, DEFAULT_REPORT_LIMIT, DEFAULT_TOP_STUDENTS_LIMIT};
pub use student::StudentRepository;
