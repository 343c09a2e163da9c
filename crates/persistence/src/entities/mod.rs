//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod attendance;
pub mod college;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod report;
pub mod student;

pub use attendance::{AttendanceDetailEntity, AttendanceEntity};
pub use college::{CollegeEntity, CollegeWithCountsEntity};
pub use event::{
    EventCategoryDb, EventEntity, EventStatusDb, EventWithCountEntity, StudentEventEntity,
};
pub use feedback::{FeedbackDetailEntity, FeedbackEntity, RatingCountEntity};
pub use registration::{RegistrationDetailEntity, RegistrationEntity};
pub use report::{
    AttendanceCountsEntity, EventPopularityEntity, FeedbackAverageEntity, OverallCountsEntity,
    StudentParticipationEntity, TopActiveStudentEntity,
};
pub use student::StudentEntity;
