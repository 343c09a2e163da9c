//! Authentication and access-gate integration tests.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_admin_login_success() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/admin/login",
            serde_json::json!({
                "email": TEST_ADMIN_EMAIL,
                "password": TEST_ADMIN_PASSWORD,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["collegeId"], college.id.to_string());
}

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/admin/login",
            serde_json::json!({
                "email": TEST_ADMIN_EMAIL,
                "password": "not-the-password",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_student_register_login_with_token() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let email = format!("alice@{}", suffix);
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/register",
            serde_json::json!({
                "name": "Alice",
                "email": email,
                "collegeId": college.id,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["student"]["isVerified"], false);
    let token = body["student"]["verificationToken"]
        .as_str()
        .expect("verification token should be present")
        .to_string();
    assert_eq!(token.len(), 9);

    // Login without the token is refused
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/login",
            serde_json::json!({ "email": email }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Supplying the token verifies in-line and logs in
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/login",
            serde_json::json!({ "email": email, "verificationToken": token }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["role"], "student");

    // Second login no longer needs the token
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/login",
            serde_json::json!({ "email": email }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_student_register_wrong_domain() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/register",
            serde_json::json!({
                "name": "Bob",
                "email": "bob@elsewhere.edu",
                "collegeId": college.id,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_student_register_duplicate_email() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let email = format!("dupe@{}", suffix);
    seed_student(&pool, "Dupe", &email, college.id).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/student/register",
            serde_json::json!({
                "name": "Dupe Again",
                "email": email,
                "collegeId": college.id,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_auth_me_returns_claims() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let token = admin_token(college.id);
    let response = app
        .oneshot(get_request_with_auth("/api/auth/me", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["id"], "admin");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["collegeId"], college.id.to_string());
}

#[tokio::test]
async fn test_admin_route_requires_token() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/colleges",
            serde_json::json!({ "name": "X", "emailDomain": "@x.edu" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_token_on_admin_route_is_forbidden() {
    let pool = create_test_pool().await;
    let (college, suffix) = seed_unique_college(&pool).await;
    let student = seed_student(&pool, "Carol", &format!("carol@{}", suffix), college.id).await;
    let app = test_app(pool.clone(), college.id).await;

    let token = student_token(student.id, &student.email, college.id);
    let response = app
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/colleges",
            &token,
            serde_json::json!({ "name": "X", "emailDomain": "@x.edu" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_admin_token_on_student_route_is_forbidden() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let token = admin_token(college.id);
    let response = app
        .oneshot(get_request_with_auth("/api/students/me/events", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let pool = create_test_pool().await;
    let (college, _) = seed_unique_college(&pool).await;
    let app = test_app(pool.clone(), college.id).await;

    let response = app
        .oneshot(get_request_with_auth("/api/auth/me", "not-a-jwt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
