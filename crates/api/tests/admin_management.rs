//! College, event, and student management integration tests.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::*;
use persistence::repositories::RegistrationRepository;

#[tokio::test]
async fn test_college_create_and_list() {
    let pool = create_test_pool().await;
    let (admin_college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), admin_college.id).await;
    let token = admin_token(admin_college.id);

    let slug = unique_slug();
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/colleges",
            &token,
            serde_json::json!({
                "name": format!("New College {}", slug),
                "emailDomain": format!("@{}.edu", slug),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["emailDomain"], format!("@{}.edu", slug));
    let college_id = body["id"].as_str().unwrap().to_string();

    // Public listing includes it with zeroed counts
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri("/api/colleges")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let entry = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == college_id)
        .expect("created college should be listed");
    assert_eq!(entry["studentCount"], 0);
    assert_eq!(entry["eventCount"], 0);
}

#[tokio::test]
async fn test_college_duplicate_name_conflict() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;
    let token = admin_token(college.id);

    let response = app
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/colleges",
            &token,
            serde_json::json!({
                "name": college.name,
                "emailDomain": "@other.edu",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_college_delete_guard() {
    let pool = create_test_pool().await;
    let (admin_college, _) = seed_unique_college(&pool).await;
    let (college, suffix) = seed_unique_college(&pool).await;
    seed_student(&pool, "Resident", &format!("res@{}", suffix), college.id).await;
    let app = test_app(pool.clone(), admin_college.id).await;
    let token = admin_token(admin_college.id);

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/colleges/{}", college.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "conflict");

    // An empty college deletes fine
    let (empty, _) = seed_unique_college(&pool).await;
    let response = app
        .oneshot(delete_request_with_auth(
            &format!("/api/colleges/{}", empty.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_event_round_trip() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;
    let token = admin_token(college.id);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/events",
            &token,
            serde_json::json!({
                "title": "Rust Workshop",
                "description": "Intro to ownership",
                "date": future_date(),
                "venue": "Lab 4",
                "category": "WORKSHOP",
                "maxCapacity": 50,
                "allowOtherColleges": false,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["maxCapacity"], 50);
    assert_eq!(body["registrationCount"], 0);
    assert_eq!(body["status"], "ACTIVE");
    let event_id = body["id"].as_str().unwrap().to_string();

    // Public fetch
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri(format!("/api/events/{}", event_id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Partial update
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/events/{}", event_id),
            &token,
            serde_json::json!({ "venue": "Auditorium" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["venue"], "Auditorium");
    assert_eq!(body["title"], "Rust Workshop");

    // Cancel, then delete
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/events/{}/cancel", event_id),
            &token,
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "CANCELLED");

    let response = app
        .oneshot(delete_request_with_auth(
            &format!("/api/events/{}", event_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_event_delete_blocked_by_registrations() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let event = seed_event(&pool, "Busy Event", future_date(), None, false, college.id).await;
    let student = seed_student(&pool, "Alice", &format!("alice@{}", suffix), college.id).await;
    RegistrationRepository::new(pool.clone())
        .create_guarded(student.id, event.id)
        .await
        .unwrap()
        .expect("seed registration");

    let app = test_app(pool.clone(), college.id).await;
    let token = admin_token(college.id);
    let response = app
        .oneshot(delete_request_with_auth(
            &format!("/api/events/{}", event.id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_event_management_scoped_to_own_college() {
    let pool = create_test_pool().await;
    let (admin_college, _) = seed_unique_college(&pool).await;
    let (other_college, _) = seed_unique_college(&pool).await;
    let event = seed_event(&pool, "Foreign Event", future_date(), None, false, other_college.id).await;

    let app = test_app(pool.clone(), admin_college.id).await;
    let token = admin_token(admin_college.id);
    let response = app
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/events/{}", event.id),
            &token,
            serde_json::json!({ "venue": "Hijacked" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_creates_and_verifies_student() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;
    let token = admin_token(college.id);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/students",
            &token,
            serde_json::json!({
                "name": "Dana",
                "email": format!("dana@{}", suffix),
                "collegeId": college.id,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["isVerified"], false);
    let student_id = body["id"].as_str().unwrap().to_string();
    let verification_token = body["verificationToken"].as_str().unwrap().to_string();

    // A wrong token is refused
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PATCH,
            &format!("/api/students/{}/verify", student_id),
            &token,
            serde_json::json!({ "verificationToken": "not-the-token" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Invalid verification token");

    // The emailed token verifies and is cleared
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PATCH,
            &format!("/api/students/{}/verify", student_id),
            &token,
            serde_json::json!({ "verificationToken": verification_token }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["isVerified"], true);
    assert!(body.get("verificationToken").is_none());

    // Resend on a verified account is refused
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/students/{}/resend-verification", student_id),
            &token,
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(delete_request_with_auth(
            &format!("/api/students/{}", student_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_student_delete_cascades_to_registrations() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let event = seed_event(&pool, "Cascade Event", future_date(), None, false, college.id).await;
    let student = seed_student(&pool, "Alice", &format!("alice@{}", suffix), college.id).await;
    let registration = RegistrationRepository::new(pool.clone())
        .create_guarded(student.id, event.id)
        .await
        .unwrap()
        .expect("seed registration");

    let app = test_app(pool.clone(), college.id).await;
    let token = admin_token(college.id);
    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/students/{}", student.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The registration went with the student
    let response = app
        .oneshot(get_request_with_auth(
            &format!("/api/registrations/{}", registration.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_list_scoped_to_admin_college() {
    let pool = create_test_pool().await;
    let (admin_college, _) = seed_unique_college(&pool).await;
    let (other_college, _) = seed_unique_college(&pool).await;
    let own = seed_event(&pool, "Own Event", future_date(), None, false, admin_college.id).await;
    let foreign =
        seed_event(&pool, "Foreign Event", future_date(), None, false, other_college.id).await;

    let app = test_app(pool.clone(), admin_college.id).await;
    let token = admin_token(admin_college.id);
    let response = app
        .oneshot(get_request_with_auth("/api/events", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert!(ids.contains(&own.id.to_string().as_str()));
    assert!(!ids.contains(&foreign.id.to_string().as_str()));
}

#[tokio::test]
async fn test_event_capacity_endpoint() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let event = seed_event(&pool, "Capacity Event", future_date(), Some(3), false, college.id).await;
    let student = seed_student(&pool, "Alice", &format!("alice@{}", suffix), college.id).await;
    RegistrationRepository::new(pool.clone())
        .create_guarded(student.id, event.id)
        .await
        .unwrap()
        .expect("seed registration");

    let app = test_app(pool.clone(), college.id).await;
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri(format!("/api/events/{}/capacity", event.id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["maxCapacity"], 3);
    assert_eq!(body["registrationCount"], 1);
    assert_eq!(body["availableSpots"], 2);
    assert_eq!(body["isFull"], false);
}
