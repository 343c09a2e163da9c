//! Report endpoint integration tests.
//!
//! All assertions scope by collegeId so parallel tests seeding their own
//! colleges cannot interfere.

mod common;

use axum::http::StatusCode;
use tower::ServiceExt;
use uuid::Uuid;

use common::*;
use persistence::repositories::{
    AttendanceRepository, FeedbackRepository, RegistrationRepository,
};

/// Seed a college with one event, three registered students, two of whom
/// attended, one of whom left a 4-star rating.
async fn seed_report_fixture(pool: &sqlx::PgPool) -> (Uuid, Uuid) {
    let (college, suffix) = seed_unique_college(pool).await;
    let event = seed_event(pool, "Report Event", today(), None, false, college.id).await;

    let registration_repo = RegistrationRepository::new(pool.clone());
    let attendance_repo = AttendanceRepository::new(pool.clone());
    let feedback_repo = FeedbackRepository::new(pool.clone());

    for i in 0..3 {
        let student = seed_student(
            pool,
            &format!("Student {}", i),
            &format!("r{}@{}", i, suffix),
            college.id,
        )
        .await;
        let registration = registration_repo
            .create_guarded(student.id, event.id)
            .await
            .unwrap()
            .expect("seed registration");

        if i < 2 {
            attendance_repo
                .create_guarded(registration.id)
                .await
                .unwrap()
                .expect("seed attendance");
        }
        if i == 0 {
            feedback_repo
                .create_guarded(registration.id, 4, Some("solid"))
                .await
                .unwrap()
                .expect("seed feedback");
        }
    }

    (college.id, event.id)
}

#[tokio::test]
async fn test_event_popularity() {
    let pool = create_test_pool().await;
    let (college_id, event_id) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!("/api/reports/event-popularity?collegeId={}", college_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["eventId"], event_id.to_string());
    assert_eq!(entries[0]["registrationCount"], 3);
    assert_eq!(entries[0]["category"], "WORKSHOP");
}

#[tokio::test]
async fn test_student_participation_rates() {
    let pool = create_test_pool().await;
    let (college_id, _) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!("/api/reports/student-participation?collegeId={}", college_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    for entry in entries {
        assert_eq!(entry["eventsRegistered"], 1);
        // Attendance rate is either 0 or 100 with one event each
        let rate = entry["attendanceRate"].as_i64().unwrap();
        assert!(rate == 0 || rate == 100);
    }
}

#[tokio::test]
async fn test_attendance_percentage_rounds() {
    let pool = create_test_pool().await;
    let (college_id, event_id) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!(
                "/api/reports/attendance-percentage?collegeId={}&eventId={}",
                college_id, event_id
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["registered"], 3);
    assert_eq!(entries[0]["attended"], 2);
    // round(100 * 2 / 3) = 67
    assert_eq!(entries[0]["attendancePercentage"], 67);
}

#[tokio::test]
async fn test_average_feedback() {
    let pool = create_test_pool().await;
    let (college_id, event_id) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!(
                "/api/reports/average-feedback?collegeId={}&eventId={}",
                college_id, event_id
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["feedbackCount"], 1);
    assert_eq!(entries[0]["averageRating"], 4.0);
}

#[tokio::test]
async fn test_top_active_students_limit() {
    let pool = create_test_pool().await;
    let (college_id, _) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!(
                "/api/reports/top-active-students?collegeId={}&limit=1",
                college_id
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["attendanceCount"], 1);
}

#[tokio::test]
async fn test_overall_stats_scoped_to_college() {
    let pool = create_test_pool().await;
    let (college_id, _) = seed_report_fixture(&pool).await;
    let app = test_app(pool.clone(), college_id).await;

    let token = admin_token(college_id);
    let response = app
        .oneshot(get_request_with_auth(
            &format!("/api/reports/overall-stats?collegeId={}", college_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["totalColleges"], 1);
    assert_eq!(body["totalStudents"], 3);
    assert_eq!(body["totalEvents"], 1);
    assert_eq!(body["totalRegistrations"], 3);
    assert_eq!(body["totalAttendance"], 2);
    assert_eq!(body["totalFeedback"], 1);
    assert_eq!(body["overallAttendancePercentage"], 67);
}

#[tokio::test]
async fn test_student_event_view_flags() {
    let pool = create_test_pool().await;
    let (college_id, event_id) = seed_report_fixture(&pool).await;
    let (_, suffix) = seed_unique_college(&pool).await; // unrelated college noise

    // A fresh student in the same college sees the event, unregistered
    let fresh = seed_student(
        &pool,
        "Fresh",
        &format!("fresh@{}", suffix),
        college_id,
    )
    .await;
    let app = test_app(pool.clone(), college_id).await;

    let token = student_token(fresh.id, &fresh.email, college_id);
    let response = app
        .oneshot(get_request_with_auth("/api/students/me/events", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entry = body
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == event_id.to_string())
        .expect("event should be visible to same-college student")
        .clone();
    assert_eq!(entry["isRegistered"], false);
    assert_eq!(entry["hasAttended"], false);
    assert_eq!(entry["hasFeedback"], false);
    assert_eq!(entry["canRegister"], true);
    assert_eq!(entry["registrationCount"], 3);
}
