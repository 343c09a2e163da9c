//! Authentication endpoint handlers.
//!
//! The admin identity is configured, not stored: login compares against the
//! configured email and argon2 hash. Students self-register and verify their
//! email with a one-time token before they can log in.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use domain::models::student::{generate_verification_token, CreateStudentRequest, Student};
use persistence::repositories::{CollegeRepository, StudentRepository};
use shared::jwt::Role;
use shared::validation::email_domain_of;

/// Admin login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Student login request.
///
/// On first login the student supplies the verification token from the
/// signup email; a matching token verifies the account in the same call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginRequest {
    pub email: String,
    pub verification_token: Option<String>,
}

/// Request to resend the verification email.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// The authenticated identity, as returned by login and `/auth/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<Uuid>,
}

impl From<&AuthIdentity> for IdentityResponse {
    fn from(identity: &AuthIdentity) -> Self {
        Self {
            id: identity.user_id.clone(),
            email: identity.email.clone(),
            role: identity.role,
            college_id: identity.college_id,
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: IdentityResponse,
}

/// Registration response carrying the created student.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub student: Student,
    pub message: String,
}

/// Simple message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Subject used in admin tokens; there is one configured admin.
const ADMIN_SUBJECT: &str = "admin";

/// Admin login against configured credentials.
///
/// POST /api/auth/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let admin = &state.config.admin;

    let email_matches = request.email.eq_ignore_ascii_case(&admin.email);
    let password_matches = shared::password::verify_password(&request.password, &admin.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;

    if !email_matches || !password_matches {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .jwt
        .issue_token(ADMIN_SUBJECT, &admin.email, Role::Admin, Some(admin.college_id))
        .map_err(|e| ApiError::Internal(format!("Failed to issue token: {}", e)))?;

    info!(email = %admin.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        user: IdentityResponse {
            id: ADMIN_SUBJECT.to_string(),
            email: admin.email.clone(),
            role: Role::Admin,
            college_id: Some(admin.college_id),
        },
    }))
}

/// Student self-registration.
///
/// POST /api/auth/student/register
///
/// The email domain must match the chosen college's domain. The account
/// starts unverified; a one-time token goes out via the email service.
pub async fn student_register(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let student = create_unverified_student(&state, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            student,
            message: "Registration successful. Check your email for a verification code."
                .to_string(),
        }),
    ))
}

/// Student login by verified email.
///
/// POST /api/auth/student/login
pub async fn student_login(
    State(state): State<AppState>,
    Json(request): Json<StudentLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());

    let student = student_repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let student: Student = if student.is_verified {
        student.into()
    } else {
        // Unverified accounts can verify in-line by presenting the token
        match request.verification_token.as_deref() {
            Some(token) => student_repo
                .verify_with_token(student.id, token)
                .await?
                .ok_or_else(|| {
                    ApiError::Unauthorized("Invalid verification token".to_string())
                })?
                .into(),
            None => {
                return Err(ApiError::Unauthorized(
                    "Email not verified. Enter the verification code from your email.".to_string(),
                ))
            }
        }
    };

    let token = state
        .jwt
        .issue_token(
            &student.id.to_string(),
            &student.email,
            Role::Student,
            Some(student.college_id),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to issue token: {}", e)))?;

    info!(student_id = %student.id, "Student logged in");

    Ok(Json(LoginResponse {
        token,
        user: IdentityResponse {
            id: student.id.to_string(),
            email: student.email.clone(),
            role: Role::Student,
            college_id: Some(student.college_id),
        },
    }))
}

/// Resend the verification email with a fresh token.
///
/// POST /api/auth/student/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let student_repo = StudentRepository::new(state.pool.clone());

    let student = student_repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if student.is_verified {
        return Err(ApiError::Validation(
            "Email is already verified".to_string(),
        ));
    }

    let token = generate_verification_token();
    student_repo
        .set_verification_token(student.id, &token)
        .await?;

    state
        .email
        .send_verification_email(&student.email, &student.name, &token)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    Ok(Json(MessageResponse {
        message: "Verification email sent".to_string(),
    }))
}

/// Returns the authenticated identity's claims.
///
/// GET /api/auth/me
pub async fn me(identity: AuthIdentity) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&identity))
}

/// Shared creation path for self-registration and admin-created students.
///
/// Enforces the college email-domain rule, rejects duplicate emails, and
/// sends the verification token through the email service.
pub(crate) async fn create_unverified_student(
    state: &AppState,
    request: &CreateStudentRequest,
) -> Result<Student, ApiError> {
    let college_repo = CollegeRepository::new(state.pool.clone());
    let student_repo = StudentRepository::new(state.pool.clone());

    let college = college_repo
        .find_by_id(request.college_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("College not found".to_string()))?;

    let email_domain = email_domain_of(&request.email)
        .ok_or_else(|| ApiError::Validation("A valid email address is required".to_string()))?;
    if !email_domain.eq_ignore_ascii_case(&college.email_domain) {
        return Err(ApiError::Validation(format!(
            "Email must use the college domain {}",
            college.email_domain
        )));
    }

    if student_repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "A student with this email already exists".to_string(),
        ));
    }

    let token = generate_verification_token();
    let student: Student = student_repo
        .create(&request.name, &request.email, college.id, false, Some(&token))
        .await?
        .into();

    state
        .email
        .send_verification_email(&student.email, &student.name, &token)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send email: {}", e)))?;

    info!(student_id = %student.id, college_id = %college.id, "Student registered");

    Ok(student)
}
