//! Student domain models and verification token generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::event::Event;

/// A student belonging to a college.
///
/// The verification token is single-use: it is cleared the first time the
/// student verifies (explicitly or by logging in with the token).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to create a student (admin) or self-register (mobile).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    pub college_id: Uuid,
}

/// Query filters for the student list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    pub college_id: Option<Uuid>,
}

/// An event annotated with the requesting student's relationship to it.
///
/// Backs the mobile "browse events" screen: the client renders register /
/// check-in / feedback actions from these flags without extra round-trips.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEventView {
    #[serde(flatten)]
    pub event: Event,
    pub registration_count: i64,
    pub is_registered: bool,
    pub has_attended: bool,
    pub has_feedback: bool,
    pub can_register: bool,
}

/// Length of the generated verification token.
pub const VERIFICATION_TOKEN_LEN: usize = 9;

/// Generate a random lowercase-alphanumeric verification token.
pub fn generate_verification_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    (0..VERIFICATION_TOKEN_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] as char
        })
        .collect()
}
