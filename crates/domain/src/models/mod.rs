//! Domain models for the Campus Events backend.

pub mod attendance;
pub mod college;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod report;
pub mod student;

pub use attendance::Attendance;
pub use college::College;
pub use event::{Event, EventCategory, EventStatus};
pub use feedback::Feedback;
pub use registration::Registration;
pub use student::Student;
