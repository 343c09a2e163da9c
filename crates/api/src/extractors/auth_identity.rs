//! Authenticated identity extractor.
//!
//! Provides an Axum extractor for the identity established by the auth
//! middleware, falling back to direct token validation when a route is not
//! behind a gating layer (e.g. `/auth/me`).

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use shared::jwt::{Claims, Role};

/// Authenticated identity from JWT claims.
///
/// `user_id` is a student UUID for student tokens and the configured admin
/// subject for admin tokens. `college_id` is always present for students;
/// admin tokens carry the college they manage.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub college_id: Option<Uuid>,
}

impl AuthIdentity {
    /// The college this identity is bound to.
    ///
    /// Tokens issued by this service always carry a college; a missing one
    /// means a foreign or legacy token.
    pub fn require_college(&self) -> Result<Uuid, ApiError> {
        self.college_id
            .ok_or_else(|| ApiError::Forbidden("Token is not bound to a college".to_string()))
    }

    /// The student UUID for student tokens.
    pub fn student_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.user_id)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))
    }
}

impl From<Claims> for AuthIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            college_id: claims.college_id,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // First, check if auth info was already inserted by middleware
        if let Some(identity) = parts.extensions.get::<AuthIdentity>() {
            return Ok(identity.clone());
        }

        // Otherwise, extract and validate the token directly
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let claims = state
            .jwt
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_claims() {
        let college_id = Uuid::new_v4();
        let claims = Claims {
            sub: "admin".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: Some(college_id),
            iat: 0,
            exp: 0,
        };
        let identity: AuthIdentity = claims.into();
        assert_eq!(identity.user_id, "admin");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.college_id, Some(college_id));
    }

    #[test]
    fn test_require_college_present() {
        let college_id = Uuid::new_v4();
        let identity = AuthIdentity {
            user_id: "admin".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: Some(college_id),
        };
        assert_eq!(identity.require_college().unwrap(), college_id);
    }

    #[test]
    fn test_require_college_missing() {
        let identity = AuthIdentity {
            user_id: "admin".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: None,
        };
        assert!(matches!(
            identity.require_college(),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_student_id_parses_uuid() {
        let id = Uuid::new_v4();
        let identity = AuthIdentity {
            user_id: id.to_string(),
            email: "alice@acme.edu".to_string(),
            role: Role::Student,
            college_id: Some(Uuid::new_v4()),
        };
        assert_eq!(identity.student_id().unwrap(), id);
    }

    #[test]
    fn test_student_id_rejects_non_uuid() {
        let identity = AuthIdentity {
            user_id: "admin".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: None,
        };
        assert!(matches!(
            identity.student_id(),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
