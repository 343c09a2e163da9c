//! JWT token utilities for admin and student identities.
//!
//! Tokens are HS256-signed bearer tokens carrying the role and (when
//! applicable) the college the identity belongs to. Admin tokens are issued
//! against configured credentials; student tokens are issued after email
//! verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Role carried in the token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// JWT token claims.
///
/// `sub` holds the user id (a student UUID, or the configured admin id),
/// `college_id` is present for students and for admins bound to a college.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email of the authenticated identity
    pub email: String,
    /// Role (admin or student)
    pub role: Role,
    /// College the identity belongs to, if any
    #[serde(rename = "collegeId", skip_serializing_if = "Option::is_none")]
    pub college_id: Option<Uuid>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 604_800;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token expiration in seconds (default: 604800 = 7 days)
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from a shared secret.
    pub fn new(secret: &str, token_expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs,
            leeway_secs,
        }
    }

    /// Issues a signed token for the given identity.
    pub fn issue_token(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
        college_id: Option<Uuid>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            college_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig::new(
            "test_secret_key_for_jwt_testing_12345",
            DEFAULT_TOKEN_EXPIRY_SECS,
            0,
        )
    }

    #[test]
    fn test_issue_student_token() {
        let config = create_test_config();
        let college_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let token = config
            .issue_token(
                &user_id.to_string(),
                "student@acme.edu",
                Role::Student,
                Some(college_id),
            )
            .unwrap();

        assert!(token.contains('.'), "JWT should have dots separating parts");

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "student@acme.edu");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.college_id, Some(college_id));
    }

    #[test]
    fn test_issue_admin_token_with_college() {
        let config = create_test_config();
        let college_id = Uuid::new_v4();

        let token = config
            .issue_token("admin-id", "admin@acme.edu", Role::Admin, Some(college_id))
            .unwrap();
        let claims = config.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "admin-id");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.college_id, Some(college_id));
    }

    #[test]
    fn test_expired_token() {
        let mut config = create_test_config();
        config.token_expiry_secs = -10;

        let token = config
            .issue_token("admin-id", "admin@acme.edu", Role::Admin, None)
            .unwrap();
        let result = config.validate_token(&token);

        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_invalid_token() {
        let config = create_test_config();
        let result = config.validate_token("invalid.token.here");

        assert!(matches!(
            result,
            Err(JwtError::InvalidToken) | Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = create_test_config();
        let other = JwtConfig::new("completely-different-secret", DEFAULT_TOKEN_EXPIRY_SECS, 0);

        let token = config
            .issue_token("admin-id", "admin@acme.edu", Role::Admin, None)
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_claims_timestamps() {
        let config = create_test_config();

        let before = Utc::now().timestamp();
        let token = config
            .issue_token("admin-id", "admin@acme.edu", Role::Admin, None)
            .unwrap();
        let after = Utc::now().timestamp();

        let claims = config.validate_token(&token).unwrap();
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, config.token_expiry_secs);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Student).unwrap(),
            "\"student\""
        );
    }

    #[test]
    fn test_college_id_omitted_when_absent() {
        let claims = Claims {
            sub: "admin-id".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: None,
            iat: 0,
            exp: 0,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("college_id"));
        assert!(!json.contains("collegeId"));
    }

    #[test]
    fn test_college_id_wire_name() {
        let college_id = Uuid::new_v4();
        let claims = Claims {
            sub: "admin-id".to_string(),
            email: "admin@acme.edu".to_string(),
            role: Role::Admin,
            college_id: Some(college_id),
            iat: 0,
            exp: 0,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json["collegeId"],
            serde_json::json!(college_id.to_string())
        );
        assert!(json.get("college_id").is_none());

        let parsed: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.college_id, Some(college_id));
    }
}
