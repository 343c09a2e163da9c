//! Role- and platform-gating middleware.
//!
//! Every protected route group gets an explicit middleware layer: the web
//! dashboard routes require an admin token, the mobile routes a student
//! token. The gate itself is a pure function over the claims so the denial
//! taxonomy can be unit tested without HTTP plumbing.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::app::AppState;
use crate::extractors::AuthIdentity;
use shared::jwt::Role;

/// Which client surface a route group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Admin dashboard routes.
    Web,
    /// Student app routes.
    Mobile,
}

/// Typed denial from the access gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessDenial {
    #[error("This action requires a different role")]
    RoleMismatch,

    #[error("This client is not allowed to access this endpoint")]
    PlatformMismatch,
}

/// Pure role/platform check.
///
/// Admins presenting a token on a mobile route (or students on a web route)
/// get PlatformMismatch; any other role disagreement is RoleMismatch. Both
/// surface as 403.
pub fn authorize(role: Role, required_role: Role, platform: Platform) -> Result<(), AccessDenial> {
    if role == required_role {
        return Ok(());
    }

    match (role, platform) {
        (Role::Admin, Platform::Mobile) | (Role::Student, Platform::Web) => {
            Err(AccessDenial::PlatformMismatch)
        }
        _ => Err(AccessDenial::RoleMismatch),
    }
}

/// Middleware requiring an admin token (web dashboard routes).
pub async fn require_admin_web(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(state, req, next, Role::Admin, Platform::Web).await
}

/// Middleware requiring a student token (mobile app routes).
pub async fn require_student_mobile(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(state, req, next, Role::Student, Platform::Mobile).await
}

/// Middleware requiring any valid token, regardless of role.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = match identity_from_request(&state, &req) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn gate(
    state: AppState,
    mut req: Request<Body>,
    next: Next,
    required_role: Role,
    platform: Platform,
) -> Response {
    let identity = match identity_from_request(&state, &req) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    if let Err(denial) = authorize(identity.role, required_role, platform) {
        tracing::debug!(role = %identity.role, ?platform, "Access denied: {}", denial);
        return forbidden_response(&denial.to_string());
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Validates the Bearer token and builds the request identity.
fn identity_from_request(state: &AppState, req: &Request<Body>) -> Result<AuthIdentity, Response> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return Err(unauthorized_response(
                "Missing or invalid Authorization header",
            ))
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => Ok(claims.into()),
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            Err(unauthorized_response("Invalid or expired token"))
        }
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create forbidden response.
fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}
